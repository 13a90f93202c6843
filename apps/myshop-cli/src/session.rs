//! # Session
//!
//! A line-oriented stand-in for the browser view: each line is parsed into
//! a [`SessionCommand`], run against the session's state, and rendered.
//!
//! ## Line Handling
//! ```text
//! "add 1"
//!    │
//!    ▼
//! SessionCommand::from_str ──── parse error ──► "⚠ ..." (session continues)
//!    │
//!    ▼
//! Session::execute ─────────── ApiError ──────► "⚠ ..." / {"code", "message"}
//!    │
//!    ▼
//! Step::Reply(text or JSON)
//! ```

use std::str::FromStr;

use serde::Serialize;
use tracing::{debug, info};

use myshop_core::GoodId;

use crate::commands::{shop, todo};
use crate::error::{ApiError, CliError};
use crate::state::{ConfigState, ShopHandle, TodoHandle};
use crate::view::{self, Page};

// =============================================================================
// Session Commands
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Goods,
    Cart,
    Wallet,
    Add(GoodId),
    Remove(GoodId),
    Clear(GoodId),
    Reset,
    Buy,
    Page(Page),
    Todos,
    TodoAdd(String),
    TodoToggle(String),
    TodoDelete(String),
    TodoEdit { id: String, title: String },
    Help,
    Quit,
}

fn good_id(command: &'static str, arg: Option<&str>) -> Result<GoodId, CliError> {
    let arg = arg.ok_or(CliError::MissingArgument {
        command,
        argument: "a good id",
    })?;

    arg.parse::<GoodId>().map_err(|e| CliError::InvalidArgument {
        argument: "good id".to_string(),
        reason: format!("'{}': {}", arg, e),
    })
}

fn todo_id(command: &'static str, arg: Option<&str>) -> Result<String, CliError> {
    arg.map(str::to_string).ok_or(CliError::MissingArgument {
        command,
        argument: "a todo id",
    })
}

/// The line after its first `words` words, inner spacing untouched.
fn rest_after(line: &str, words: usize) -> &str {
    let mut rest = line.trim_start();
    for _ in 0..words {
        rest = rest
            .find(char::is_whitespace)
            .map_or("", |at| rest[at..].trim_start());
    }
    rest.trim_end()
}

impl FromStr for SessionCommand {
    type Err = CliError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let head = words.next().unwrap_or_default().to_lowercase();

        let command = match head.as_str() {
            "goods" | "list" => SessionCommand::Goods,
            "cart" => SessionCommand::Cart,
            "wallet" | "balance" => SessionCommand::Wallet,
            "add" => SessionCommand::Add(good_id("add", words.next())?),
            "remove" => SessionCommand::Remove(good_id("remove", words.next())?),
            "clear" => SessionCommand::Clear(good_id("clear", words.next())?),
            "reset" => SessionCommand::Reset,
            "buy" => SessionCommand::Buy,
            "page" => {
                let rest = rest_after(line, 1);
                if rest.is_empty() {
                    return Err(CliError::MissingArgument {
                        command: "page",
                        argument: "a page name",
                    });
                }
                SessionCommand::Page(rest.parse()?)
            }
            "todos" => SessionCommand::Todos,
            "todo" => {
                let action = words.next().unwrap_or_default().to_lowercase();
                match action.as_str() {
                    "add" => SessionCommand::TodoAdd(rest_after(line, 2).to_string()),
                    "toggle" => SessionCommand::TodoToggle(todo_id("todo toggle", words.next())?),
                    "delete" => SessionCommand::TodoDelete(todo_id("todo delete", words.next())?),
                    "edit" => {
                        let id = todo_id("todo edit", words.next())?;
                        let title = rest_after(line, 3).to_string();
                        SessionCommand::TodoEdit { id, title }
                    }
                    "" => SessionCommand::Todos,
                    other => return Err(CliError::UnknownCommand(format!("todo {}", other))),
                }
            }
            "help" | "?" => SessionCommand::Help,
            "quit" | "exit" => SessionCommand::Quit,
            other => return Err(CliError::UnknownCommand(other.to_string())),
        };

        Ok(command)
    }
}

// =============================================================================
// Session
// =============================================================================

/// How replies are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Result of one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Text to show; the session goes on.
    Reply(String),
    /// Blank line; nothing to show.
    Empty,
    /// The user asked to leave.
    Quit,
}

/// One user's session: shop, todos, config and the current page.
#[derive(Debug, Clone)]
pub struct Session {
    shop: ShopHandle,
    todos: TodoHandle,
    config: ConfigState,
    page: Page,
    format: OutputFormat,
}

impl Session {
    /// Builds the shop from `config` (seed goods or catalog file).
    pub fn new(config: ConfigState, format: OutputFormat) -> Result<Self, CliError> {
        let state = config.initial_state()?;
        info!(
            store = %config.store_name,
            balance = %state.balance(),
            goods = state.goods().len(),
            "session started"
        );

        Ok(Session {
            shop: ShopHandle::new(state),
            todos: TodoHandle::new(),
            config,
            page: Page::default(),
            format,
        })
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn shop(&self) -> &ShopHandle {
        &self.shop
    }

    /// Parses and runs one line.
    ///
    /// Store and input errors are rendered into the reply; only output
    /// failures come back as `Err`.
    pub fn handle_line(&mut self, line: &str) -> Result<Step, CliError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Step::Empty);
        }

        match line.parse::<SessionCommand>() {
            Ok(command) => self.execute(command),
            Err(err) => {
                debug!(%err, line, "unparseable line");
                self.reply_error(&ApiError::from(&err))
            }
        }
    }

    /// Runs one command.
    pub fn execute(&mut self, command: SessionCommand) -> Result<Step, CliError> {
        debug!(?command, page = %self.page, "executing");

        match command {
            SessionCommand::Goods => {
                let resp = shop::get_goods(&self.shop);
                self.reply(&resp, |r| view::render_goods(&r.goods))
            }
            SessionCommand::Cart => {
                let resp = shop::get_cart(&self.shop, &self.config);
                self.reply(&resp, |r| view::render_cart(&r.summary, &self.config))
            }
            SessionCommand::Wallet => {
                let resp = shop::get_wallet(&self.shop);
                self.reply(&resp, |r| view::render_wallet(r.balance))
            }
            SessionCommand::Add(id) => {
                let result = shop::add_to_cart(&self.shop, &self.config, id);
                self.reply_cart(result)
            }
            SessionCommand::Remove(id) => {
                let result = shop::remove_one(&self.shop, &self.config, id);
                self.reply_cart(result)
            }
            SessionCommand::Clear(id) => {
                let result = shop::clear_line(&self.shop, &self.config, id);
                self.reply_cart(result)
            }
            SessionCommand::Reset => {
                let result = shop::reset_cart(&self.shop, &self.config);
                self.reply_cart(result)
            }
            SessionCommand::Buy => match shop::buy_all(&self.shop, &self.config) {
                Ok(resp) => self.reply(&resp, view::render_purchase),
                Err(err) => self.reply_error(&err),
            },
            SessionCommand::Page(page) => {
                self.page = page;
                info!(%page, "navigated");
                self.render_page()
            }
            SessionCommand::Todos => {
                let resp = todo::get_todos(&self.todos);
                self.reply(&resp, |r| view::render_todos(&r.todos))
            }
            SessionCommand::TodoAdd(title) => {
                let result = todo::add_todo(&self.todos, &title);
                self.reply_todos(result)
            }
            SessionCommand::TodoToggle(id) => {
                let resp = todo::toggle_todo(&self.todos, &id);
                self.reply_todos(Ok(resp))
            }
            SessionCommand::TodoDelete(id) => {
                let resp = todo::delete_todo(&self.todos, &id);
                self.reply_todos(Ok(resp))
            }
            SessionCommand::TodoEdit { id, title } => {
                let result = todo::edit_todo(&self.todos, &id, &title);
                self.reply_todos(result)
            }
            SessionCommand::Help => Ok(Step::Reply(view::render_help())),
            SessionCommand::Quit => Ok(Step::Quit),
        }
    }

    /// Header, navigation and the current page body.
    pub fn render_page(&self) -> Result<Step, CliError> {
        if self.format == OutputFormat::Json {
            return self.reply(&PageResponse { page: self.page }, |_| String::new());
        }

        let mut out = view::render_header(&self.config, self.page);
        match self.page {
            Page::Home => out.push_str(&view::render_home()),
            Page::Shop => {
                let (goods, summary, balance) = self.shop.with_store(|s| {
                    (
                        s.goods().to_vec(),
                        s.summary(&self.config.shipping),
                        s.balance(),
                    )
                });
                out.push_str(&view::render_shop_page(
                    &goods,
                    &summary,
                    balance,
                    &self.config,
                ));
            }
            Page::Todos => {
                let resp = todo::get_todos(&self.todos);
                out.push_str(&view::render_todos(&resp.todos));
            }
        }
        Ok(Step::Reply(out))
    }

    // =========================================================================
    // Rendering helpers
    // =========================================================================

    fn reply<T, F>(&self, value: &T, text: F) -> Result<Step, CliError>
    where
        T: Serialize,
        F: FnOnce(&T) -> String,
    {
        let out = match self.format {
            OutputFormat::Text => text(value),
            OutputFormat::Json => format!("{}\n", serde_json::to_string(value)?),
        };
        Ok(Step::Reply(out))
    }

    fn reply_error(&self, err: &ApiError) -> Result<Step, CliError> {
        self.reply(err, view::render_error)
    }

    fn reply_cart(&self, result: Result<shop::CartResponse, ApiError>) -> Result<Step, CliError> {
        match result {
            Ok(resp) => self.reply(&resp, |r| {
                let mut out = view::render_cart(&r.summary, &self.config);
                if !r.applied {
                    out.push_str(&view::render_unchanged());
                }
                out
            }),
            Err(err) => self.reply_error(&err),
        }
    }

    fn reply_todos(&self, result: Result<todo::TodosResponse, ApiError>) -> Result<Step, CliError> {
        match result {
            Ok(resp) => self.reply(&resp, |r| {
                let mut out = view::render_todos(&r.todos);
                if !r.applied {
                    out.push_str(&view::render_unchanged());
                }
                out
            }),
            Err(err) => self.reply_error(&err),
        }
    }
}

#[derive(Debug, Serialize)]
struct PageResponse {
    page: Page,
}
