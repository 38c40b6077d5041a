//! Rendering declarative page descriptions with `acomponent`.

pub mod describe;
