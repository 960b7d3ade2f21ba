//! Actions that can be triggered by keybindings
//!
//! Each action represents a single, atomic operation in the UI.

/// All mappable UI actions
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    /// Quit the application
    Quit,

    // ========== Chat Scrolling ==========
    /// Scroll chat up by N lines
    ScrollUp(u16),
    /// Scroll chat down by N lines
    ScrollDown(u16),
    /// Scroll chat up by a page
    ScrollPageUp,
    /// Scroll chat down by a page
    ScrollPageDown,
    /// Scroll to top of chat
    ScrollToTop,
    /// Scroll to bottom of chat
    ScrollToBottom,

    // ========== Widgets ==========
    /// Move the widget highlight forward
    SelectNext,
    /// Move the widget highlight back
    SelectPrev,
    /// Choose the highlighted button, star or option
    Confirm,
    /// Send the multi-choice selection
    SubmitChoices,
    /// Give a star rating directly (1-5)
    Rate(u8),

    // ========== Call ==========
    /// Accept the incoming call
    AcceptCall,
}
