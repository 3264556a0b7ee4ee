//! Per-descriptor buffer management.
//!
//! Each tracked descriptor owns one growable byte buffer holding bytes that
//! have been read but not yet handed out as records. It is an implementation
//! detail and not part of the public API.

mod descriptor;

pub(crate) use descriptor::DescriptorBuffer;
