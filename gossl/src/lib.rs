//! # gossl
//!
//! Core traits for encoding and decoding in the gossl toolkit.
//!
//! This crate defines the fundamental `Decoder` and `Encoder` traits that
//! establish a type-safe conversion pattern used throughout gossl.
//!
//! ## Overview
//!
//! The conversion pattern flows like this:
//! ```text
//! PEM → Vec<u8> → ASN.1 objects → typed key structure → Container
//! ```
//!
//! Each step uses the `Decoder` trait to convert from one type to the next,
//! and the `Encoder` trait to convert in the reverse direction.
//!
//! ## Type Safety
//!
//! The traits use marker traits (`DecodableFrom` and `EncodableTo`) to ensure
//! type safety at compile time. This prevents invalid conversions and catches
//! errors early in the development process.
//!
//! ## Example
//!
//! The following example demonstrates the decoding pattern. Note that specific
//! implementations are provided by the `pem`, `asn1`, and `pkcs` crates:
//!
//! ```ignore
//! use gossl::decoder::Decoder;
//! use pem::Pem;
//!
//! // Decode a PEM block to the enclosed DER bytes
//! let pem: Pem = "-----BEGIN CERTIFICATE-----\nAAA=\n-----END CERTIFICATE-----".decode()?;
//! let der_bytes: Vec<u8> = pem.decode()?;
//! ```

#![forbid(unsafe_code)]

pub mod decoder;
pub mod encoder;
