//! Crate Feature Flags
//!
//! The following crate feature flags are available. They are configured in your
//! `Cargo.toml` where the dependency on `ndarray-base` is defined.
//!
//! ## `std`
//!   - Rust standard library (enabled by default)
//!   - Forwards to the `std` features of `num-traits`, `num-integer` and
//!     `num-complex`.
//!
//! ## `serde`
//!   - Enables serialization support for serde 1.x
//!   - Derives `Serialize` and `Deserialize` for [`DType`](crate::DType),
//!     [`Order`](crate::Order), [`IndexMode`](crate::IndexMode),
//!     [`CastingMode`](crate::CastingMode), [`MetaData`](crate::MetaData)
//!     and the factory option structs.
