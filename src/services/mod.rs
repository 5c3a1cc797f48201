pub mod forwarder;
pub mod otp;
pub mod translator;
