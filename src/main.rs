//! # watermark-scan CLI
//!
//! Command-line interface for the text watermark detector.
//!
//! ## Usage
//! ```bash
//! watermark-scan analyze suspicious.txt
//! watermark-scan analyze --text "Some text" --output json
//! watermark-scan samples --analyze
//! ```

mod cli;

use text_watermark_detector::Result;

fn main() -> Result<()> {
    cli::run()
}
