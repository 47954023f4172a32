//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in petitcat-core on top of `embedded-hal` 1.0:
//!
//! - Hobby servo on a PWM channel (head actuator)
//! - HC-SR04 ultrasonic ranger (range sensor)

#![no_std]
#![deny(unsafe_code)]

pub mod sensor;
pub mod servo;
