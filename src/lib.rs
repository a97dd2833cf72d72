pub mod automaton;
pub mod config;
pub mod error;
pub mod html;
pub mod renderer;
pub mod tags;

pub use config::Config;
pub use config::ConfigBuilder;
pub use error::EngineError;
pub use html::{HtmlSink, HtmlWriter};
pub use renderer::Renderer;
pub use tags::{NestingRule, Tag, TagKind, TagTable};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Renders `_em_`, `__strong__` and `~~strike~~` markup to HTML.
///
/// Delimiters that cannot be paired are kept as literal text, so the result never contains
/// unbalanced tags.
///
/// # Examples
///
/// ```rust
/// let html = tagdown::render("a __b _c_ d__ e", None).unwrap();
/// assert_eq!(html, "a <strong>b <em>c</em> d</strong> e");
/// ```
///
/// # Arguments
///
/// * `input` - The text to render
/// * `config` - Optional configuration (defaults to the built-in tag table)
///
/// Builds a fresh [`Renderer`] on every call; keep a `Renderer` around when rendering many
/// inputs.
pub fn render(input: &str, config: Option<Config>) -> Result<String, EngineError> {
    #[cfg(debug_assertions)]
    {
        init_logger();
    }

    let config = config.unwrap_or_default();
    Renderer::from_config(&config)?.render(input)
}

pub fn render_with_defaults(input: &str) -> Result<String, EngineError> {
    render(input, None)
}
