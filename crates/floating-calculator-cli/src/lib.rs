//! floatcalc: command-line host for the floating calculator widget
//!
//! ## Usage
//!
//! ```bash
//! floatcalc keys 5 + 3 x 2 =                        # prints 16
//! floatcalc keys --trace 200 + 10 %                 # JSON line per token
//! floatcalc drag --grab 30,30 --to 900,500          # prints the final X,Y
//! floatcalc --config widget.yaml config --format yaml
//! ```

pub mod commands;
pub mod error;
pub mod handlers;
pub mod logging;

pub use commands::{Cli, Commands, ConfigArgs, ConfigFormat, DragArgs, KeysArgs, PositionFormat};
pub use error::{CliError, CliResult};
