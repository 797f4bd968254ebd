#![doc = include_str!("../README.md")]

//---------------------------------------------------------------------------------------------------- Public API
#[cfg(feature = "duration")]
pub mod duration;

//----------------------------------------------------------------------------------------------------
