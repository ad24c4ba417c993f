//! Context selection and FAQ generation.
//!
//! Data flows leaf-first through the stages:
//!
//! 1. [`ContextSelector`] picks qualifying session buffers for a feature area.
//! 2. [`coalesce`] flattens explicit payloads into text.
//! 3. [`FaqRequester`] asks the backend for a JSON array of pairs.
//! 4. [`ResponseCoercer`] recovers pairs from whatever came back.
//! 5. [`displayable`] drops blank pairs before presentation.
//!
//! [`generate_faqs`] runs 3 to 5 and always yields at least one pair.

pub mod coalesce;
pub mod coerce;
pub mod faq;
pub mod request;
pub mod select;

#[cfg(test)]
pub(crate) mod testing;

pub use coalesce::{CoalesceConfig, Coalescer, DEFAULT_MAX_DEPTH, coalesce};
pub use coerce::{
    BracketExtraction, CONSULTATION_ANSWER, CONSULTATION_QUESTION, DEFAULT_SNIPPET_GRAPHEMES,
    FOCUS_QUESTION, ParseFailure, ParseStrategy, ResponseCoercer, StrictJson,
};
pub use faq::{
    FaqGenerator, FaqOutcome, FaqResult, SERVICE_FAILURE_ANSWER, SERVICE_FAILURE_QUESTION,
    displayable, generate_faqs,
};
pub use request::{CONTENT_PLACEHOLDER, FAQ_PROMPT_TEMPLATE, FaqRequester};
pub use select::{
    ContextSelector, DEFAULT_AREA_MIN_CHARS, DEFAULT_FALLBACK_MIN_CHARS,
    DEFAULT_RESULT_MIN_CHARS, SelectionConfig, select_context,
};
