//! Message identifiers and event payloads.
//!
//! Messages use the numbering of the classic native window procedure, so a
//! platform backend can forward its message codes unchanged. Control
//! notifications (a button being clicked, a text box being edited) live in a
//! separate range above the 16-bit message space; see
//! [`MessageId::notification`].

use std::fmt;

use crate::object::ObjectType;

/// First id of the notification range.
const NOTIFICATION_BASE: u32 = 0x1_0000;

/// Identifies one kind of message delivered to a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct MessageId(pub u32);

impl MessageId {
    pub const CREATE: Self = Self(0x0001);
    pub const DESTROY: Self = Self(0x0002);
    pub const MOVE: Self = Self(0x0003);
    pub const SIZE: Self = Self(0x0005);
    pub const PAINT: Self = Self(0x000F);
    pub const CLOSE: Self = Self(0x0010);
    pub const QUIT: Self = Self(0x0012);
    pub const WINDOW_POS_CHANGED: Self = Self(0x0047);
    pub const KEY_DOWN: Self = Self(0x0100);
    pub const KEY_UP: Self = Self(0x0101);
    pub const CHAR: Self = Self(0x0102);
    pub const COMMAND: Self = Self(0x0111);
    pub const MOUSE_MOVE: Self = Self(0x0200);
    pub const LBUTTON_DOWN: Self = Self(0x0201);
    pub const LBUTTON_UP: Self = Self(0x0202);
    pub const LBUTTON_DBLCLK: Self = Self(0x0203);
    pub const RBUTTON_DOWN: Self = Self(0x0204);
    pub const RBUTTON_UP: Self = Self(0x0205);
    pub const MBUTTON_DOWN: Self = Self(0x0207);
    pub const MBUTTON_UP: Self = Self(0x0208);
    pub const MOUSE_WHEEL: Self = Self(0x020A);
    /// First id available for application-defined messages.
    pub const USER: Self = Self(0x0400);

    /// A button was clicked.
    pub const CLICKED: Self = Self::notification(0x0000);
    /// The text of an edit control was changed by the user.
    pub const TEXT_CHANGED: Self = Self::notification(0x0300);

    const POINTER_FIRST: u32 = 0x0200;
    const POINTER_LAST: u32 = 0x020E;

    /// The message id for a control notification code.
    pub const fn notification(code: u16) -> Self {
        Self(NOTIFICATION_BASE + code as u32)
    }

    /// The raw message value.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }

    /// The notification code if this id is in the notification range.
    pub fn notification_code(self) -> Option<u16> {
        self.0
            .checked_sub(NOTIFICATION_BASE)
            .and_then(|code| u16::try_from(code).ok())
    }

    /// Classify the message.
    pub fn category(self) -> MessageCategory {
        match self.0 {
            Self::POINTER_FIRST..=Self::POINTER_LAST => MessageCategory::Pointer,
            0x0100..=0x0109 => MessageCategory::Keyboard,
            0x000F => MessageCategory::Paint,
            0x0003 | 0x0005 | 0x0046 | 0x0047 => MessageCategory::Geometry,
            0x0001 | 0x0002 | 0x0010 | 0x0012 => MessageCategory::Lifecycle,
            0x0111 => MessageCategory::Command,
            0x0400..=0xFFFF => MessageCategory::User,
            raw if raw >= NOTIFICATION_BASE => MessageCategory::Notification,
            _ => MessageCategory::Other,
        }
    }

    /// Whether the message belongs to the pointer family.
    #[inline]
    pub fn is_pointer(self) -> bool {
        self.category() == MessageCategory::Pointer
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.notification_code() {
            Some(code) => write!(f, "notify:{code:#06x}"),
            None => write!(f, "msg:{:#06x}", self.0),
        }
    }
}

/// Broad families of messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageCategory {
    /// Mouse movement and buttons. Payloads carry cursor coordinates.
    Pointer,
    /// Key presses and character input.
    Keyboard,
    /// A request to repaint.
    Paint,
    /// Position and size changes.
    Geometry,
    /// Creation, close, destroy and quit.
    Lifecycle,
    /// A command from a child control to its parent.
    Command,
    /// A control notification routed to the control itself.
    Notification,
    /// Application-defined messages.
    User,
    /// Anything else.
    Other,
}

/// Low 16 bits of a parameter, sign-extended.
#[inline]
pub fn low_word(param: isize) -> i16 {
    (param & 0xFFFF) as u16 as i16
}

/// Bits 16..32 of a parameter, sign-extended.
#[inline]
pub fn high_word(param: isize) -> i16 {
    ((param >> 16) & 0xFFFF) as u16 as i16
}

/// Pack two 16-bit values into one parameter, low word first.
#[inline]
pub fn make_param(low: i32, high: i32) -> isize {
    let low = (low as u16) as u32;
    let high = (high as u16) as u32;
    ((high << 16) | low) as isize
}

/// The parameters of one message occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventArgs {
    message: MessageId,
    param1: usize,
    param2: isize,
}

impl EventArgs {
    pub fn new(message: MessageId, param1: usize, param2: isize) -> Self {
        Self {
            message,
            param1,
            param2,
        }
    }

    #[inline]
    pub fn message(&self) -> MessageId {
        self.message
    }

    #[inline]
    pub fn param1(&self) -> usize {
        self.param1
    }

    #[inline]
    pub fn param2(&self) -> isize {
        self.param2
    }

    /// Overwrite the stored parameters.
    pub fn update(&mut self, message: MessageId, param1: usize, param2: isize) {
        self.message = message;
        self.param1 = param1;
        self.param2 = param2;
    }
}

/// The parameters of a pointer message plus the decoded cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MouseEventArgs {
    args: EventArgs,
    x: i32,
    y: i32,
}

impl MouseEventArgs {
    pub fn new(message: MessageId, param1: usize, param2: isize) -> Self {
        let mut mouse = Self::default();
        mouse.update(message, param1, param2);
        mouse
    }

    #[inline]
    pub fn args(&self) -> &EventArgs {
        &self.args
    }

    /// Cursor x in client coordinates.
    #[inline]
    pub fn x(&self) -> i32 {
        self.x
    }

    /// Cursor y in client coordinates.
    #[inline]
    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn update(&mut self, message: MessageId, param1: usize, param2: isize) {
        self.args.update(message, param1, param2);
        self.x = i32::from(low_word(param2));
        self.y = i32::from(high_word(param2));
    }
}

/// The payload delivered to an event callback.
///
/// The variant is fixed when a slot is created: pointer-family messages get
/// [`EventPayload::Mouse`], all others [`EventPayload::Plain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventPayload {
    Plain(EventArgs),
    Mouse(MouseEventArgs),
}

impl EventPayload {
    /// A zeroed payload of the variant appropriate for `message`.
    pub fn for_message(message: MessageId) -> Self {
        if message.is_pointer() {
            Self::Mouse(MouseEventArgs::default())
        } else {
            Self::Plain(EventArgs::default())
        }
    }

    /// Overwrite the payload in place. Calling this twice with the same
    /// triple leaves the same state as calling it once.
    pub fn update(&mut self, message: MessageId, param1: usize, param2: isize) {
        match self {
            Self::Plain(args) => args.update(message, param1, param2),
            Self::Mouse(mouse) => mouse.update(message, param1, param2),
        }
    }

    pub fn args(&self) -> &EventArgs {
        match self {
            Self::Plain(args) => args,
            Self::Mouse(mouse) => mouse.args(),
        }
    }

    pub fn mouse(&self) -> Option<&MouseEventArgs> {
        match self {
            Self::Mouse(mouse) => Some(mouse),
            Self::Plain(_) => None,
        }
    }

    #[inline]
    pub fn message(&self) -> MessageId {
        self.args().message()
    }

    #[inline]
    pub fn param1(&self) -> usize {
        self.args().param1()
    }

    #[inline]
    pub fn param2(&self) -> isize {
        self.args().param2()
    }

    /// The object kind this payload corresponds to.
    pub fn object_type(&self) -> ObjectType {
        match self {
            Self::Plain(_) => ObjectType::EventArgs,
            Self::Mouse(_) => ObjectType::MouseEventArgs,
        }
    }
}
