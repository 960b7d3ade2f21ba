mod bubble;
mod chat_header;
mod chat_view;
mod choice_buttons;
mod dialog;
mod global_footer;
mod incoming_call;
mod inline_widget;
mod key_hints;
mod multi_choice;
mod star_rating;
mod typing_indicator;

use ratatui::style::Color;

pub use bubble::{wrap_ranges, Bubble, Side};
pub use chat_header::ChatHeader;
pub use chat_view::{ChatContent, ChatView};
pub use choice_buttons::ChoiceButtonsState;
pub use dialog::{DialogFrame, InstructionBar};
pub use global_footer::{FooterContext, GlobalFooter};
pub use incoming_call::IncomingCall;
pub use inline_widget::{InlineWidget, InlineWidgets, WidgetReport};
pub use key_hints::{render_key_hints, KeyHintBarStyle};
pub use multi_choice::MultiChoiceState;
pub use star_rating::StarRatingState;
pub use typing_indicator::TypingIndicator;

// Palette
pub const ACCENT_PRIMARY: Color = Color::Rgb(59, 130, 246);
pub const ACCENT_SUCCESS: Color = Color::Rgb(34, 197, 94);
pub const ACCENT_DANGER: Color = Color::Rgb(239, 68, 68);
pub const ACCENT_STAR: Color = Color::Rgb(250, 204, 21);
pub const BG_SCREEN: Color = Color::Rgb(236, 236, 236);
pub const BG_BOT: Color = Color::White;
pub const BG_ELEVATED: Color = Color::Rgb(28, 28, 32);
pub const TEXT_BOT: Color = Color::Rgb(31, 41, 55);
pub const TEXT_USER: Color = Color::White;
pub const TEXT_MUTED: Color = Color::Rgb(107, 114, 128);
pub const TEXT_FAINT: Color = Color::Rgb(156, 163, 175);
pub const TEXT_SECONDARY: Color = Color::Rgb(209, 213, 219);
