// thread_viewer — A terminal viewer for exported chat threads
// Copyright (C) 2025  Simon Peter Rothgang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! The thread model and the windowed view over it.

pub mod index;
pub mod message;
pub mod policy;
pub mod search;
pub mod state;
pub mod window;

pub use index::{ChronoIndex, StorageIndex};
pub use message::{AttachmentKind, Conversation, Media, Message, MessageBody, Reaction, Share};
pub use policy::{WindowPolicy, default_window_policy};
pub use search::{Direction, SearchCursor, SearchPattern};
pub use state::{StateParseError, WindowState};
pub use window::MessageWindow;
