/// Show/hide state of the popup window.
///
/// A context submenu sets `suppress_auto_hide`, which blocks the
/// focus-loss transition until the submenu closes; Escape and explicit
/// activation are unaffected by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PopupState {
    shown: bool,
    suppress_auto_hide: bool,
}

impl PopupState {
    pub fn is_shown(&self) -> bool {
        self.shown
    }

    /// Toggle-button activation. Returns whether the popup is shown
    /// after the transition.
    pub fn on_activate(&mut self) -> bool {
        self.shown = !self.shown;
        if !self.shown {
            self.suppress_auto_hide = false;
        }
        self.shown
    }

    /// Escape always hides a shown popup. Returns true when a
    /// transition happened.
    pub fn on_escape(&mut self) -> bool {
        if self.shown {
            self.shown = false;
            self.suppress_auto_hide = false;
            return true;
        }
        false
    }

    /// Focus loss hides the popup unless a context submenu is open.
    /// Returns true when a transition happened.
    pub fn on_focus_lost(&mut self) -> bool {
        if self.shown && !self.suppress_auto_hide {
            self.shown = false;
            return true;
        }
        false
    }

    pub fn begin_context_menu(&mut self) {
        self.suppress_auto_hide = true;
    }

    pub fn end_context_menu(&mut self) {
        self.suppress_auto_hide = false;
    }

    /// Unconditional hide, used after an application was activated.
    pub fn hide(&mut self) {
        self.shown = false;
        self.suppress_auto_hide = false;
    }
}
