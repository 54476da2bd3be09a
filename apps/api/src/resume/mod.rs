// Resume intake: text acquisition and field extraction.
// Extractors are pure functions of the text and `ExtractionOptions`; nothing
// here outlives a single request.

pub mod acquire;
pub mod email;
pub mod fields;
pub mod handlers;
pub mod name;
pub mod phone;
pub mod skills;

