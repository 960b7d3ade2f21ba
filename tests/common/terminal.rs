//! TUI testing utilities using Ratatui's TestBackend
//!
//! Provides helpers for rendering the app to a test buffer and converting
//! the output to strings.

use ratatui::{backend::TestBackend, buffer::Buffer, layout::Rect, Terminal};

use concierge::App;

/// Create a test terminal with custom dimensions
pub fn create_test_terminal_sized(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).expect("Failed to create test terminal")
}

/// Draw one frame of `app` and return the terminal
pub fn render_app(app: &mut App, width: u16, height: u16) -> Terminal<TestBackend> {
    let mut terminal = create_test_terminal_sized(width, height);
    terminal.draw(|f| app.draw(f)).expect("draw");
    terminal
}

/// Convert a buffer to a string, one line per row
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut output = String::new();

    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            if let Some(cell) = buffer.cell((x, y)) {
                output.push_str(cell.symbol());
            }
        }
        output.push('\n');
    }

    output
}

/// Extract a specific region of the buffer as a string
pub fn buffer_region_to_string(buffer: &Buffer, area: Rect) -> String {
    let mut output = String::new();

    for y in area.y..area.y.saturating_add(area.height) {
        for x in area.x..area.x.saturating_add(area.width) {
            if let Some(cell) = buffer.cell((x, y)) {
                output.push_str(cell.symbol());
            }
        }
        if y < area.y + area.height - 1 {
            output.push('\n');
        }
    }

    output
}

/// Check if the buffer contains a string anywhere
pub fn buffer_contains(buffer: &Buffer, text: &str) -> bool {
    buffer_to_string(buffer).contains(text)
}

/// Assert that a specific region of the buffer contains expected text
pub fn assert_region_contains(buffer: &Buffer, area: Rect, expected: &str) {
    let actual = buffer_region_to_string(buffer, area);

    assert!(
        actual.contains(expected),
        "Buffer region does not contain expected text.\nExpected: {}\nActual:\n{}",
        expected,
        actual
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::Paragraph;

    #[test]
    fn test_region_excludes_other_rows() {
        let mut terminal = create_test_terminal_sized(20, 5);
        terminal
            .draw(|f| {
                let para = Paragraph::new("Строка 1\nСтрока 2\nСтрока 3");
                f.render_widget(para, f.area());
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let output = buffer_region_to_string(buffer, Rect::new(0, 0, 8, 2));
        assert!(output.contains("Строка 1"));
        assert!(output.contains("Строка 2"));
        assert!(!output.contains("Строка 3"));
        assert!(buffer_contains(buffer, "Строка 3"));
    }
}
