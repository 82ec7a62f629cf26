//! `ActionKit` resolves the customer actions a payment gateway issues during 3DS2
//! authentication (device fingerprinting, challenges, browser redirects) into the
//! continuation tokens the gateway expects next.
//!
//! Host platforms provide the capabilities the SDK can't implement itself: a
//! [`DeviceAuthenticator`] backed by a certified 3DS2 SDK and a [`WebAuthenticationSession`]
//! able to present a browser. Everything else (payload decoding, validation, token
//! encoding, timeouts, cancellation) happens here.
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]

mod action;
pub use action::*;

mod config;
pub use config::*;

mod error;
pub use error::*;

mod resolver;
pub use resolver::*;

pub mod codec;

pub mod device;
pub use device::{
    AuthenticationConfiguration, AuthenticationRequestParameters, ChallengeParameters,
    ChallengeResult, DeviceAuthenticator,
};

pub mod web;
pub use web::{WebAuthenticationCallback, WebAuthenticationRequest, WebAuthenticationSession};

pub mod logger;

uniffi::setup_scaffolding!("actionkit_core");
