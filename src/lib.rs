//! Quick-fix server that fills a C++ `switch` over an enum with one `case`
//! per enumerator.
//!
//! The server owns no C++ parser.  Whether a switch is over an enum, what
//! the enum is called and which members it has are all worked out by
//! querying the host editor's own language intelligence (definition,
//! hover, type definition, document symbols, completion).
//!
//! - [`validator`]: decides whether a range is a switch over an enum.
//! - [`hover`]: scrapes the declared type name out of hover markdown.
//! - [`symbols`]: bounded symbol-tree search for the enum declaration.
//! - [`generator`]: builds and applies the case block.
//! - [`host`]: the query/edit traits and their LSP-client implementation.
//! - [`server`]: the `LanguageServer` implementation.
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tower_lsp::Client;

pub mod actions;
pub mod config;
pub mod generator;
pub mod host;
pub mod hover;
mod server;
pub mod symbols;
pub mod types;
pub mod util;
pub mod validator;

pub use config::Config;
pub use host::{ClientHost, EditSink, Host, HostError, LanguageService};

/// Command id of the accept surface.
pub const ADD_CASES_COMMAND: &str = "enumswitch.addCases";

/// Title of the command attached to the quick-fix.
pub const ADD_CASES_TITLE: &str = "Add Cases";

/// An open document as last synchronised by the client.
#[derive(Debug, Clone)]
pub struct OpenDocument {
    pub language_id: Option<String>,
    pub text: String,
}

pub struct Backend {
    name: String,
    version: String,
    open_files: Arc<Mutex<HashMap<String, OpenDocument>>>,
    config: Arc<RwLock<Config>>,
    /// `--config` path given on the command line.
    config_path: Option<PathBuf>,
    workspace_root: Arc<Mutex<Option<PathBuf>>>,
    host: Option<Arc<dyn Host>>,
    client: Option<Client>,
}

impl Backend {
    pub fn new(client: Client) -> Self {
        Self::with_config_path(client, None)
    }

    pub fn with_config_path(client: Client, config_path: Option<PathBuf>) -> Self {
        let host: Arc<dyn Host> = Arc::new(ClientHost::new(client.clone()));
        Self {
            host: Some(host),
            client: Some(client),
            config_path,
            ..Self::detached()
        }
    }

    /// A backend with no client and no host; queries cannot be answered.
    pub fn new_test() -> Self {
        Self::detached()
    }

    /// A backend whose host queries and edits go to `host` instead of a
    /// connected client.
    pub fn new_test_with_host(host: Arc<dyn Host>) -> Self {
        Self {
            host: Some(host),
            ..Self::detached()
        }
    }

    fn detached() -> Self {
        Self {
            name: "EnumSwitch".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            open_files: Arc::new(Mutex::new(HashMap::new())),
            config: Arc::new(RwLock::new(Config::default())),
            config_path: None,
            workspace_root: Arc::new(Mutex::new(None)),
            host: None,
            client: None,
        }
    }

    /// Snapshot of the active configuration.
    pub fn config(&self) -> Config {
        self.config.read().clone()
    }

    pub fn set_config(&self, config: Config) {
        *self.config.write() = config;
    }

    /// Text of an open document, if the client has sent it.
    pub fn document_text(&self, uri: &str) -> Option<String> {
        self.open_files.lock().get(uri).map(|doc| doc.text.clone())
    }

    pub(crate) fn document(&self, uri: &str) -> Option<OpenDocument> {
        self.open_files.lock().get(uri).cloned()
    }
}
