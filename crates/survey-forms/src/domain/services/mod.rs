//! Domain services module

pub mod renderer;
pub mod formatter;

pub use renderer::{
    render_text, Choice, FormRenderer, FormSession, RenderedField, RenderedInput,
    NO_SELECTION_LABEL, TEXTAREA_ROWS,
};
pub use formatter::{DisplayLayout, FormattedEntry, FormattedResponses, ResponseFormatter, NOT_AVAILABLE};
