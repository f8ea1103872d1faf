#![no_std]
#![doc = include_str!("../README.md")]

#[cfg(test)]
extern crate std;

extern crate alloc;

mod batch;
#[doc(inline)]
pub use batch::Flushed;
pub mod config;
pub mod counter;
#[doc(inline)]
pub use counter::Counter;
pub mod debug;
pub mod dispatch;
mod error;
#[doc(inline)]
pub use error::{Error, Result, UnknownFieldError};
pub mod event;
#[doc(inline)]
pub use event::ChangeEvent;
mod ext;
#[doc(inline)]
pub use ext::SignalExt;
pub mod form;
#[doc(inline)]
pub use form::{FieldBinding, Form};
pub mod input;
#[doc(inline)]
pub use input::ControlledInput;
pub mod map;
pub mod record;
#[doc(inline)]
pub use record::Record;
pub mod state;
#[doc(inline)]
pub use state::State;
pub mod stream;

pub use tether_core::{Signal, Writable, watcher};
