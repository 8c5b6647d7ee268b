//! Command-line option parsing driven by declared option descriptors.
//!
//! Arguments are tokenized once, up front, without knowing which options exist:
//! - `-abc` is three short options `a`, `b` and `c`
//! - `--name=value` / `-n=value` carry an inline value
//! - a bare token following a valueless option becomes that option's value
//! - `--` ends option parsing; everything after it is positional
//!
//! Options are then declared with [`OptionParser::describe`], which reconciles
//! the already-tokenized input with the option's value policy. Lookups with
//! [`OptionParser::find`] consume one occurrence at a time, so repeated flags
//! (`-v -v`) can be counted.
//!
//! ```
//! use optparse::{Descriptor, OptionParser};
//!
//! let mut parser = OptionParser::new(["-v", "--output", "out.txt", "in.txt"]);
//! let verbose = parser.describe(Descriptor::new("verbose", "Verbose output").short('v')).unwrap();
//! let output = parser
//!     .describe(Descriptor::new("output", "Output file").short('o').takes_value())
//!     .unwrap();
//!
//! assert!(!parser.reject_unknown());
//! assert!(parser.has(verbose));
//! assert_eq!(parser.find(output).and_then(|o| o.value()), Some("out.txt"));
//! assert_eq!(parser.positional_arguments(), ["in.txt"]);
//! ```

mod descriptor;
mod error;
mod help;
mod parser;
mod tokenizer;

pub use descriptor::{Descriptor, OptionId};
pub use error::{OptionError, Result};
pub use parser::OptionParser;
pub use tokenizer::{PassedOption, Tokens, tokenize};
