use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tagdown")]
#[command(author, version)]
#[command(about = "Render _em_, __strong__ and ~~strike~~ markup to HTML")]
#[command(
    long_about = "Tagdown renders a small markup dialect to HTML: _emphasis_, __strong__ and \
    ~~strikethrough~~. Delimiters that cannot be paired, that sit inside words (snake_case, \
    c_12_3) or that are escaped with a backslash are kept as literal text."
)]
#[command(after_help = "\
EXAMPLES:

    # Render a file to stdout
    tagdown render notes.md

    # Render from stdin
    echo 'a _b_ c' | tagdown render

    # Render many files in parallel, writing <name>.html next to each
    tagdown batch docs/*.md

    # Inspect how delimiters are classified
    tagdown tokens notes.md

CONFIGURATION:

Tagdown looks for configuration files in this order:
  1. Explicit --config path
  2. tagdown.toml or .tagdown.toml in current/parent directories
  3. tagdown/config.toml in the user config directory
  4. Built-in defaults

Example .tagdown.toml:

    [tags]
    \"_\" = \"em\"
    \"__\" = \"strong\"
    \"~~\" = \"strike\"

    [[nesting]]
    tag = \"strong\"
    forbidden_inside = \"em\"")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file
    #[arg(long, global = true)]
    #[arg(help = "Path to configuration file")]
    #[arg(
        long_help = "Path to a custom configuration file. If not specified, tagdown will \
        search for .tagdown.toml or tagdown.toml in the current directory and its parents, \
        then fall back to tagdown/config.toml in the user config directory."
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a document to HTML
    #[command(
        long_about = "Render a document to HTML. Reads the file (or stdin) and writes the \
        result to stdout, or to the path given with --output."
    )]
    #[command(after_help = "\
EXAMPLES:

    # Render to stdout
    tagdown render notes.md

    # Render from stdin
    echo '__bold__ and _em_' | tagdown render

    # Render into a file
    tagdown render notes.md --output notes.html

RENDERING RULES:

  - _text_ becomes <em>, __text__ becomes <strong>, ~~text~~ becomes <strike>
  - An opening delimiter must be followed by a non-space character
  - A closing delimiter must be preceded by a non-space character
  - Delimiters glued to text on both sides (c_12_3) stay literal
  - Only spaces separate delimiters from text; tabs and line breaks do not
  - A backslash before a delimiter keeps it literal
  - __strong__ does not nest inside _em_; the reverse works
  - Unpaired delimiters are left as they are")]
    Render {
        /// Input file (stdin if not provided)
        #[arg(help = "Input file path")]
        file: Option<PathBuf>,

        /// Write HTML to this file instead of stdout
        #[arg(short, long)]
        #[arg(help = "Output file path")]
        output: Option<PathBuf>,
    },
    /// Render several documents in parallel
    #[command(
        long_about = "Render several documents in parallel. Each input is written to a file \
        with the same name and an .html extension, next to the input or inside --out-dir."
    )]
    Batch {
        /// Input files
        #[arg(required = true, help = "Input file paths")]
        files: Vec<PathBuf>,

        /// Directory for rendered files
        #[arg(long)]
        #[arg(help = "Write rendered files into this directory")]
        out_dir: Option<PathBuf>,
    },
    /// Show the delimiter tokens found in a document
    #[command(
        long_about = "Tokenize a document and list literal text runs and delimiter \
        occurrences with their byte offset, tag name and classification \
        (opening, closing or fake). Useful for understanding why a delimiter was or was \
        not rendered."
    )]
    Tokens {
        /// Input file (stdin if not provided)
        #[arg(help = "Input file path")]
        file: Option<PathBuf>,
    },
}
