//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

use std::time::Duration;

/// URL given to freshly created requests
pub const DEFAULT_HTTP_URL: &str = "http://httpbin.org/get";

/// Collection created and activated at startup
pub const DEFAULT_COLLECTION_NAME: &str = "Unsorted Collection";

/// Leading character that turns the bottom line into a command line
pub const COMMAND_PREFIX: char = ':';

/// How long a single input poll may block before the loop ticks
pub const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Width of the collection pane, borders included
pub const COLLECTION_PANE_WIDTH: u16 = 50;

/// HTTP client timeout
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Diagnostic log written when started with `--debug`
pub const LOG_FILE_NAME: &str = "courier.log";

/// Directory under the platform config dir holding `settings.yaml`
pub const CONFIG_DIR_NAME: &str = "courier";
