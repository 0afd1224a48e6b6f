//! Action sink for X11-based systems.
//!
//! Pointer motion uses a plain `WarpPointer` request. Button clicks, scroll
//! steps and key combos are injected through the XTEST extension so they
//! reach applications exactly like physical input.

use crate::{
    actions::{Action, ActionSink, Key, Modifier, ScreenSize},
    error::{AppError, Result},
    utils::safe_cast::f64_to_pixel_clamp,
};
use log::{debug, info};
use x11rb::{
    connection::Connection,
    protocol::{
        xproto::{
            ConnectionExt, Keycode, Keysym, Screen, BUTTON_PRESS_EVENT, BUTTON_RELEASE_EVENT,
            KEY_PRESS_EVENT, KEY_RELEASE_EVENT,
        },
        xtest::ConnectionExt as XTestConnectionExt,
    },
    rust_connection::RustConnection,
    CURRENT_TIME, NONE,
};

/// X11 pointer buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Button {
    Left = 1,
    Right = 3,
    WheelUp = 4,
    WheelDown = 5,
}

const XK_LEFT: Keysym = 0xff51;
const XK_RIGHT: Keysym = 0xff53;
const XK_SHIFT_L: Keysym = 0xffe1;
const XK_CONTROL_L: Keysym = 0xffe3;
const XK_ALT_L: Keysym = 0xffe9;
const XK_SUPER_L: Keysym = 0xffeb;

/// Keysym of a combo modifier
#[must_use]
pub const fn modifier_keysym(modifier: Modifier) -> Keysym {
    match modifier {
        Modifier::Control => XK_CONTROL_L,
        Modifier::Alt => XK_ALT_L,
        Modifier::Shift => XK_SHIFT_L,
        Modifier::Super => XK_SUPER_L,
    }
}

/// Keysym of a combo key
#[must_use]
pub const fn key_keysym(key: Key) -> Keysym {
    match key {
        Key::Left => XK_LEFT,
        Key::Right => XK_RIGHT,
    }
}

/// Buttons to press for a scroll amount, one click per unit
#[must_use]
pub fn scroll_clicks(amount: i32) -> (Button, u32) {
    let button = if amount >= 0 { Button::WheelUp } else { Button::WheelDown };
    (button, amount.unsigned_abs())
}

/// Action sink driving the X11 pointer and keyboard
pub struct X11Sink {
    connection: RustConnection,
    screen: Screen,
    screen_width: u16,
    screen_height: u16,
}

impl X11Sink {
    /// Connect to the display named by `$DISPLAY`
    pub fn new() -> Result<Self> {
        info!("Initializing X11 action sink");

        // Connect to X11 server
        let (connection, screen_num) = RustConnection::connect(None)
            .map_err(|e| AppError::X11(format!("Failed to connect to X11: {e}")))?;

        // Get screen information
        let screen = connection
            .setup()
            .roots
            .get(screen_num)
            .ok_or_else(|| AppError::X11("Failed to get screen".to_string()))?
            .clone();

        let version = connection
            .xtest_get_version(2, 2)
            .map_err(|e| AppError::X11(format!("Failed to query XTEST: {e}")))?
            .reply()
            .map_err(|e| AppError::X11(format!("XTEST extension unavailable: {e}")))?;

        let screen_width = screen.width_in_pixels;
        let screen_height = screen.height_in_pixels;

        info!(
            "Connected to X11 display, screen: {}x{}, XTEST {}.{}",
            screen_width, screen_height, version.major_version, version.minor_version
        );

        Ok(Self {
            connection,
            screen,
            screen_width,
            screen_height,
        })
    }

    /// Set cursor position (absolute), clamped to the screen
    pub fn set_position(&self, x: f64, y: f64) -> Result<()> {
        let x = f64_to_pixel_clamp(x, self.screen_width);
        let y = f64_to_pixel_clamp(y, self.screen_height);

        debug!("Setting cursor position to ({}, {})", x, y);

        self.connection
            .warp_pointer(NONE, self.screen.root, 0, 0, 0, 0, x, y)
            .map_err(|e| AppError::InputSink(format!("Failed to warp pointer: {e}")))?;

        self.flush()
    }

    /// Press and release a pointer button
    pub fn click(&self, button: Button) -> Result<()> {
        self.fake(BUTTON_PRESS_EVENT, button as u8)?;
        self.fake(BUTTON_RELEASE_EVENT, button as u8)?;
        self.flush()
    }

    /// Scroll by a signed number of wheel steps
    pub fn scroll(&self, amount: i32) -> Result<()> {
        let (button, clicks) = scroll_clicks(amount);
        for _ in 0..clicks {
            self.fake(BUTTON_PRESS_EVENT, button as u8)?;
            self.fake(BUTTON_RELEASE_EVENT, button as u8)?;
        }
        self.flush()
    }

    /// Press `key` while holding `modifier`
    pub fn key_combo(&self, modifier: Modifier, key: Key) -> Result<()> {
        let modifier_code = self.keycode(modifier_keysym(modifier))?;
        let key_code = self.keycode(key_keysym(key))?;

        self.fake(KEY_PRESS_EVENT, modifier_code)?;
        self.fake(KEY_PRESS_EVENT, key_code)?;
        self.fake(KEY_RELEASE_EVENT, key_code)?;
        self.fake(KEY_RELEASE_EVENT, modifier_code)?;
        self.flush()
    }

    fn fake(&self, event_type: u8, detail: u8) -> Result<()> {
        self.connection
            .xtest_fake_input(event_type, detail, CURRENT_TIME, self.screen.root, 0, 0, 0)
            .map_err(|e| AppError::InputSink(format!("Failed to inject input: {e}")))?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.connection
            .flush()
            .map_err(|e| AppError::InputSink(format!("Failed to flush connection: {e}")))
    }

    /// Find the keycode producing a keysym in the current keyboard mapping
    fn keycode(&self, keysym: Keysym) -> Result<Keycode> {
        let setup = self.connection.setup();
        let (min, max) = (setup.min_keycode, setup.max_keycode);
        let mapping = self
            .connection
            .get_keyboard_mapping(min, max - min + 1)
            .map_err(|e| AppError::InputSink(format!("Failed to request keyboard mapping: {e}")))?
            .reply()
            .map_err(|e| AppError::InputSink(format!("Failed to read keyboard mapping: {e}")))?;

        let per_keycode = usize::from(mapping.keysyms_per_keycode);
        if per_keycode == 0 {
            return Err(AppError::InputSink("Empty keyboard mapping".to_string()));
        }

        mapping
            .keysyms
            .chunks(per_keycode)
            .position(|syms| syms.contains(&keysym))
            .and_then(|offset| u8::try_from(offset).ok())
            .map(|offset| min + offset)
            .ok_or_else(|| AppError::InputSink(format!("No keycode for keysym {keysym:#x}")))
    }
}

impl ActionSink for X11Sink {
    fn perform(&mut self, action: &Action) -> Result<()> {
        match *action {
            Action::MoveCursor { x, y } => self.set_position(x, y),
            Action::Click => self.click(Button::Left),
            Action::RightClick => self.click(Button::Right),
            Action::Scroll(amount) => self.scroll(amount),
            Action::KeyCombo(modifier, key) => self.key_combo(modifier, key),
        }
    }

    fn screen_size(&self) -> Option<ScreenSize> {
        Some(ScreenSize::new(u32::from(self.screen_width), u32::from(self.screen_height)))
    }

    fn name(&self) -> &str {
        "x11"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[ignore] // Requires X11 display
    fn test_x11_sink_reports_screen() {
        let sink = X11Sink::new().expect("X11 display with XTEST");
        let screen = sink.screen_size().expect("X11 sink knows its screen");
        assert!(screen.width > 0 && screen.height > 0);
        assert_eq!(sink.name(), "x11");
    }

    #[test]
    fn test_scroll_direction() {
        assert_eq!(scroll_clicks(-10), (Button::WheelDown, 10));
        assert_eq!(scroll_clicks(3), (Button::WheelUp, 3));
        assert_eq!(scroll_clicks(0), (Button::WheelUp, 0));
    }

    #[test]
    fn test_navigation_keysyms() {
        assert_eq!(modifier_keysym(Modifier::Control), 0xffe3);
        assert_eq!(key_keysym(Key::Left), 0xff51);
        assert_eq!(key_keysym(Key::Right), 0xff53);
    }
}
