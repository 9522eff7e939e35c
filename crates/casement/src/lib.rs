//! Casement - a retained-mode GUI composition core.
//!
//! Casement manages a tree of nested controls, each owning an off-screen
//! [`Surface`](casement_render::Surface) holding its last-rendered look.
//! The toolkit's job is the pipeline around that tree:
//!
//! - **Incremental rendering**: a change marks its control and every
//!   ancestor dirty; the next tick re-renders only dirty subtrees and
//!   composites cached child surfaces bottom-up into their parents.
//! - **Anchor layout**: controls pin edges to parent edges at captured
//!   distances and are repositioned/resized when ancestors resize.
//! - **Event routing**: pointer input walks the tree front-to-back with
//!   propagation stopping, hover tracking, and drag capture; keyboard input
//!   goes to the focused control after global shortcut matching.
//!
//! Concrete widget skins, windowing, and GPU presentation stay outside:
//! Casement talks to its host through the narrow [`WindowHost`],
//! [`TextMetrics`](casement_render::TextMetrics), and
//! [`Clipboard`](platform::Clipboard) interfaces.
//!
//! # Example
//!
//! ```
//! use casement::{Gui, widgets::Panel};
//! use casement_render::{Color, FixedMetrics, Size};
//!
//! let mut gui = Gui::new(Size::new(640.0, 480.0), Box::new(FixedMetrics::default()));
//!
//! let panel = Panel::new().with_background(Color::from_rgb8(40, 40, 48));
//! let panel_id = gui.add(gui.root(), Box::new(panel));
//! gui.set_position(panel_id, (10.0, 10.0).into());
//! gui.set_size(panel_id, Size::new(200.0, 100.0));
//! ```

pub mod animate;
pub mod control;
pub mod gui;
pub mod host;
pub mod platform;
pub mod widgets;

pub use animate::{Easing, Tween};
pub use control::anchors::{AnchorSet, Edge};
pub use control::auto_layout::AutoLayout;
pub use control::base::{ControlBase, Edges, EventCallback};
pub use control::compose::{ComposeStats, RenderPolicy};
pub use control::cursor::CursorShape;
pub use control::events::{
    ControlEvent, EventData, EventKind, Key, KeyEvent, KeyboardModifiers, PointerButton,
    PointerEvent, RawInput, RawKeyEvent, RawPointerEvent, RawPointerKind,
};
pub use control::scroll::ScrollModel;
pub use control::shortcut::{KeyChord, ShortcutMap};
pub use control::traits::{Control, PaintContext};
pub use control::tree::{ControlId, ControlTree};
pub use gui::Gui;
pub use host::{NullHost, WindowHost};
