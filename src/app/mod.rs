//! Application layer: sessions and the games played through them.
//!
//! A [`Session`] owns the value table for one run. It is opened from an
//! [`EngineConfig`], which picks the storage adapter, and it saves the table
//! after every finished game.
//!
//! ```text
//! EngineConfig ──> Session ──owns──> ValueTable
//!                     │              PolicyEngine
//!                     │              Box<dyn ValueTableRepository>
//!                     ├── HumanGame        (machine O vs human X)
//!                     └── play_self_game   (table vs itself)
//! ```
//!
//! # Testing
//!
//! ```
//! use qtictactoe::adapters::InMemoryRepository;
//! use qtictactoe::app::{EngineConfig, Session};
//!
//! let config = EngineConfig::new("weights.json").with_seed(42);
//! let mut session = Session::open_with(&config, Box::new(InMemoryRepository::new()));
//! let game = session.play_self_game()?;
//! assert!(game.final_state.is_terminal());
//! # Ok::<(), qtictactoe::Error>(())
//! ```

pub mod config;
pub mod human;
pub mod self_play;
pub mod session;

pub use config::{DEFAULT_TABLE_PATH, EngineConfig, TableFormat};
pub use human::{HUMAN, HumanGame, MACHINE, TurnResult};
pub use self_play::{SELF_PLAY_FIRST, SelfPlayGame, SelfPlaySummary};
pub use session::{Session, TableSource};
