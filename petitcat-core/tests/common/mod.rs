//! Mock collaborators shared by the integration tests

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use petitcat_core::config::{HeadConfig, HEAD_ANGLE_MIN};
use petitcat_core::traits::{HeadActuator, RangeSensor};
use petitcat_core::{Echo, EchoAligner};

/// Servo that records every commanded angle
#[derive(Default)]
pub struct RecordingServo {
    pub moves: Vec<i16>,
}

impl HeadActuator for RecordingServo {
    fn move_to(&mut self, angle_deg: i16) {
        self.moves.push(angle_deg);
    }
}

/// Ranger replaying a script, then reporting no echo
pub struct ScriptedRanger {
    script: VecDeque<Echo>,
}

impl ScriptedRanger {
    pub fn new(samples: &[Echo]) -> Self {
        Self {
            script: samples.iter().copied().collect(),
        }
    }
}

impl RangeSensor for ScriptedRanger {
    fn measure(&mut self) -> Echo {
        self.script.pop_front().unwrap_or(Echo::NoEcho)
    }
}

pub fn scripted(
    samples: &[Echo],
    config: HeadConfig,
) -> EchoAligner<RecordingServo, ScriptedRanger> {
    EchoAligner::new(RecordingServo::default(), ScriptedRanger::new(samples), config).unwrap()
}

/// Servo half of a static scene: publishes where the head points
pub struct SceneServo {
    angle: Rc<Cell<i16>>,
}

impl HeadActuator for SceneServo {
    fn move_to(&mut self, angle_deg: i16) {
        self.angle.set(angle_deg);
    }
}

/// Ranger half of a static scene: one echo per head angle
pub struct SceneRanger {
    angle: Rc<Cell<i16>>,
    /// Echo seen at each angle, indexed from -90
    echoes: Vec<Echo>,
}

impl RangeSensor for SceneRanger {
    fn measure(&mut self) -> Echo {
        let index = (self.angle.get() - HEAD_ANGLE_MIN) as usize;
        self.echoes[index]
    }
}

/// Build an aligner looking at a scene that does not move
pub fn static_scene(echoes: Vec<Echo>, config: HeadConfig) -> EchoAligner<SceneServo, SceneRanger> {
    assert_eq!(echoes.len(), 181);
    let angle = Rc::new(Cell::new(0));
    let servo = SceneServo {
        angle: Rc::clone(&angle),
    };
    let ranger = SceneRanger { angle, echoes };
    EchoAligner::new(servo, ranger, config).unwrap()
}

pub fn mm(value: u16) -> Echo {
    Echo::Distance(value)
}
