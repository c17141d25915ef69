//! Wizard Rendering
//!
//! Each step renders into a list of owned lines inside one centered box.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Flex, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::agent::{BUILTIN_PLUGINS, ClientKind, MemoryFlag};
use crate::wizard::{AgentWizard, Field, SubmissionStatus, WizardStep};

use super::app::WizardApp;

const BRAND_BLUE: Color = Color::Rgb(70, 130, 180);
const BRAND_GOLD: Color = Color::Rgb(218, 165, 32);
const ACCENT_GOLD: Color = Color::Rgb(184, 134, 11);

/// Lines above the step content (blank, dots, blank, title, subtitle, blank)
const HEADER_LINES: usize = 6;

pub fn render(f: &mut Frame, app: &WizardApp) {
    render_wizard(f, &app.wizard);
}

/// Render the entire wizard
pub fn render_wizard(f: &mut Frame, wizard: &AgentWizard) {
    let area = f.area();
    let step = wizard.step;

    let mut lines: Vec<Line<'static>> = Vec::new();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        render_progress_dots(step),
        Style::default().fg(BRAND_BLUE),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Step {}: {}", step.number(), step.title()),
        Style::default().fg(BRAND_GOLD).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        step.subtitle().to_string(),
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(""));

    // Index of the focused slot's line, for scrolling
    let mut focused_line = 0usize;
    let fields = wizard.fields();
    let focused = fields.get(wizard.focused_field).copied();

    match step {
        WizardStep::Basic => render_basic(&mut lines, wizard, focused, &mut focused_line),
        WizardStep::Personality => {
            render_personality(&mut lines, wizard, focused, &mut focused_line)
        }
        WizardStep::Tokenize => render_tokenize(&mut lines),
        WizardStep::Review => render_review(&mut lines, wizard, focused, &mut focused_line),
    }

    if wizard.advanced_mode {
        render_advanced(&mut lines, wizard, focused, &mut focused_line);
    }

    if let Some(ref err) = wizard.validation_error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  ! {}", err),
            Style::default().fg(Color::Red),
        )));
    }
    if let Some(ref msg) = wizard.status_message {
        lines.push(Line::from(Span::styled(
            format!("  · {}", msg),
            Style::default().fg(Color::Yellow),
        )));
    }
    if let Some(field) = wizard.suggestion {
        lines.push(Line::from(Span::styled(
            format!("  Generating {}...", field.label()),
            Style::default().fg(BRAND_BLUE),
        )));
    }

    lines.push(Line::from(""));
    lines.push(render_footer(wizard));
    lines.push(Line::from(""));

    let box_width = 72u16.min(area.width.saturating_sub(4));
    let inner_width = box_width.saturating_sub(2) as usize;
    let footer_start = lines.len() - 3;

    let centered: Vec<Line<'static>> = lines
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            if i < HEADER_LINES || i >= footer_start {
                center_line(line, inner_width)
            } else {
                line
            }
        })
        .collect();

    let content_height = (centered.len() as u16).saturating_add(2);
    let box_height = content_height.min(area.height.saturating_sub(2));
    let visible_rows = box_height.saturating_sub(2) as usize;

    // Keep the focused slot on screen
    let scroll: u16 = if centered.len() > visible_rows && focused_line > visible_rows / 2 {
        let max_scroll = centered.len().saturating_sub(visible_rows);
        (focused_line - visible_rows / 2).min(max_scroll) as u16
    } else {
        0
    };

    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .flex(Flex::Center)
        .constraints([Constraint::Length(box_height)])
        .split(area);
    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .flex(Flex::Center)
        .constraints([Constraint::Length(box_width)])
        .split(v_chunks[0]);

    let title = format!(
        " Create Trading Agent ({}/{}) ",
        step.number(),
        WizardStep::total()
    );
    let paragraph = Paragraph::new(centered)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(BRAND_BLUE))
                .title(Span::styled(
                    title,
                    Style::default().fg(BRAND_BLUE).add_modifier(Modifier::BOLD),
                )),
        )
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));

    f.render_widget(paragraph, h_chunks[0]);
}

fn center_line(line: Line<'static>, inner_width: usize) -> Line<'static> {
    let width: usize = line.spans.iter().map(|s| s.content.width()).sum();
    if width == 0 || width >= inner_width {
        return line;
    }
    let mut spans = vec![Span::raw(" ".repeat((inner_width - width) / 2))];
    spans.extend(line.spans);
    Line::from(spans)
}

/// Filled dots up to the current step; Tokenize is drawn dimmed
fn render_progress_dots(step: WizardStep) -> String {
    let current = step.number();
    WizardStep::ALL
        .iter()
        .map(|s| match (s.number() <= current, s.is_selectable()) {
            (true, _) => "●",
            (false, true) => "○",
            (false, false) => "◌",
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_footer(wizard: &AgentWizard) -> Line<'static> {
    let key = |k: &str, color: Color| {
        Span::styled(
            k.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )
    };
    let label = |l: &str| Span::styled(l.to_string(), Style::default().fg(Color::White));

    let mut footer = vec![key(" [Esc] ", Color::Red), label("Back  ")];
    if wizard.step == WizardStep::Tokenize {
        footer.push(key("[b] ", BRAND_BLUE));
        footer.push(label("Go Back  "));
        footer.push(key("[s] ", ACCENT_GOLD));
        footer.push(label("Skip to Review"));
        return Line::from(footer);
    }
    footer.push(key("[Tab] ", BRAND_BLUE));
    footer.push(label("Next Field  "));
    footer.push(key("[Enter] ", ACCENT_GOLD));
    footer.push(label("Confirm  "));
    footer.push(key("[^G] ", BRAND_GOLD));
    footer.push(label("Random  "));
    footer.push(key("[^T] ", BRAND_GOLD));
    footer.push(label(if wizard.advanced_mode {
        "Simple"
    } else {
        "Advanced"
    }));
    if wizard.suggestions_enabled && wizard.focused().and_then(|f| f.suggestion()).is_some() {
        footer.push(key("  [^S] ", BRAND_GOLD));
        footer.push(label("Suggest"));
    }
    Line::from(footer)
}

fn mark_focus(lines: &[Line<'static>], is_focused: bool, focused_line: &mut usize) {
    if is_focused {
        *focused_line = lines.len();
    }
}

/// Single- or multi-line text input
fn text_field(
    lines: &mut Vec<Line<'static>>,
    label: &str,
    value: &str,
    placeholder: &str,
    is_focused: bool,
    focused_line: &mut usize,
) {
    mark_focus(lines, is_focused, focused_line);
    let label_style = Style::default().fg(if is_focused {
        BRAND_BLUE
    } else {
        Color::DarkGray
    });
    let value_style = Style::default().fg(if is_focused {
        Color::White
    } else {
        Color::Gray
    });
    let cursor = if is_focused { "█" } else { "" };

    lines.push(Line::from(Span::styled(format!("  {}:", label), label_style)));
    if value.is_empty() {
        lines.push(Line::from(vec![
            Span::raw("    "),
            Span::styled(placeholder.to_string(), Style::default().fg(Color::DarkGray)),
            Span::styled(cursor.to_string(), value_style),
        ]));
        return;
    }
    let mut rows: Vec<&str> = value.split('\n').collect();
    let last = rows.pop().unwrap_or("");
    for row in rows {
        lines.push(Line::from(Span::styled(format!("    {}", row), value_style)));
    }
    lines.push(Line::from(Span::styled(
        format!("    {}{}", last, cursor),
        value_style,
    )));
}

/// Checkbox row
fn toggle_field(
    lines: &mut Vec<Line<'static>>,
    label: &str,
    checked: bool,
    is_focused: bool,
    focused_line: &mut usize,
) {
    mark_focus(lines, is_focused, focused_line);
    lines.push(Line::from(vec![
        Span::styled(
            if is_focused { " > " } else { "   " },
            Style::default().fg(ACCENT_GOLD),
        ),
        Span::styled(
            if checked { "[x]" } else { "[ ]" },
            Style::default().fg(if checked { BRAND_GOLD } else { Color::DarkGray }),
        ),
        Span::styled(
            format!(" {}", label),
            Style::default()
                .fg(if is_focused { Color::White } else { Color::Gray })
                .add_modifier(if is_focused {
                    Modifier::BOLD
                } else {
                    Modifier::empty()
                }),
        ),
    ]));
}

fn section(lines: &mut Vec<Line<'static>>, title: &str) {
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("  {}", title),
        Style::default().fg(BRAND_GOLD).add_modifier(Modifier::BOLD),
    )));
}

// --- Individual step renderers ---

fn render_basic(
    lines: &mut Vec<Line<'static>>,
    wizard: &AgentWizard,
    focused: Option<Field>,
    focused_line: &mut usize,
) {
    let draft = &wizard.draft;
    let is = |field: Field| focused == Some(field);

    text_field(lines, "Agent Name", &draft.name, "e.g. AlphaTrader", is(Field::Name), focused_line);
    text_field(lines, "Ticker", &draft.ticker, "e.g. ALPH", is(Field::Ticker), focused_line);
    text_field(
        lines,
        "Description",
        &draft.description,
        "What does your agent do?",
        is(Field::Description),
        focused_line,
    );

    let picture = if draft.picture.starts_with("data:") {
        "uploaded image".to_string()
    } else {
        draft.picture.clone()
    };
    lines.push(Line::from(Span::styled(
        format!("  Picture: {}", picture),
        Style::default().fg(Color::DarkGray),
    )));
    text_field(
        lines,
        "Upload image (path, Enter to load)",
        &wizard.picture_input,
        "",
        is(Field::Picture),
        focused_line,
    );

    section(lines, "Client Integrations");
    for kind in ClientKind::ALL {
        toggle_field(
            lines,
            kind.label(),
            draft.clients.get(kind),
            is(Field::Client(kind)),
            focused_line,
        );
    }
}

fn render_personality(
    lines: &mut Vec<Line<'static>>,
    wizard: &AgentWizard,
    focused: Option<Field>,
    focused_line: &mut usize,
) {
    let is = |field: Field| focused == Some(field);

    text_field(
        lines,
        "Personality",
        &wizard.draft.personality,
        "Trading style, risk approach, markets, specialties...",
        is(Field::Personality),
        focused_line,
    );
    text_field(
        lines,
        "Topics (one per line)",
        &wizard.topics_input,
        "Leave empty to derive from personality",
        is(Field::Topics),
        focused_line,
    );

    section(lines, "Memory");
    for flag in MemoryFlag::ALL {
        toggle_field(
            lines,
            flag.label(),
            wizard.draft.memory_settings.get(flag),
            is(Field::Memory(flag)),
            focused_line,
        );
    }
}

fn render_tokenize(lines: &mut Vec<Line<'static>>) {
    lines.push(Line::from(Span::styled(
        "  Coming Soon",
        Style::default().fg(BRAND_GOLD).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        "  Tokenization is not available yet. Agents are created untokenized.",
        Style::default().fg(Color::DarkGray),
    )));
}

fn render_review(
    lines: &mut Vec<Line<'static>>,
    wizard: &AgentWizard,
    focused: Option<Field>,
    focused_line: &mut usize,
) {
    let row = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("  {:<13}", label), Style::default().fg(Color::DarkGray)),
            Span::styled(value, Style::default().fg(Color::White)),
        ])
    };

    section(lines, "Basic Information");
    lines.push(row("Name:", wizard.summary_name().to_string()));
    lines.push(row("Ticker:", wizard.summary_ticker().to_string()));
    lines.push(row("Description:", wizard.summary_description()));

    section(lines, "Integrations");
    lines.push(row("Clients:", wizard.summary_clients()));
    lines.push(row("Plugins:", wizard.summary_plugins()));
    lines.push(Line::from(""));

    let is_focused = focused == Some(Field::Create);
    mark_focus(lines, is_focused, focused_line);
    let (label, color) = match &wizard.submission {
        SubmissionStatus::Pending => ("Creating...".to_string(), Color::DarkGray),
        SubmissionStatus::Created(_) => ("Done".to_string(), BRAND_GOLD),
        _ => ("Create Agent".to_string(), ACCENT_GOLD),
    };
    lines.push(Line::from(vec![
        Span::styled(
            if is_focused { " > " } else { "   " },
            Style::default().fg(ACCENT_GOLD),
        ),
        Span::styled(
            format!("[ {} ]", label),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
    ]));

    match &wizard.submission {
        SubmissionStatus::Created(msg) => lines.push(Line::from(Span::styled(
            format!("  ✓ {}", msg),
            Style::default().fg(Color::Green),
        ))),
        SubmissionStatus::Failed(msg) => lines.push(Line::from(Span::styled(
            format!("  ✗ {}", msg),
            Style::default().fg(Color::Red),
        ))),
        SubmissionStatus::Idle | SubmissionStatus::Pending => {}
    }
}

fn render_advanced(
    lines: &mut Vec<Line<'static>>,
    wizard: &AgentWizard,
    focused: Option<Field>,
    focused_line: &mut usize,
) {
    let is = |field: Field| focused == Some(field);

    section(lines, "Advanced: Memory Management");
    for flag in MemoryFlag::ALL {
        toggle_field(
            lines,
            flag.label(),
            wizard.draft.memory_settings.get(flag),
            is(Field::AdvancedMemory(flag)),
            focused_line,
        );
    }

    section(lines, "Advanced: Plugins");
    for (i, (id, label)) in BUILTIN_PLUGINS.iter().enumerate() {
        toggle_field(
            lines,
            label,
            wizard.draft.has_plugin(id),
            is(Field::Plugin(i)),
            focused_line,
        );
    }
    for (i, id) in wizard.draft.custom_plugins().enumerate() {
        toggle_field(
            lines,
            &format!("{} (Del to remove)", id),
            true,
            is(Field::CustomPlugin(i)),
            focused_line,
        );
    }
    text_field(
        lines,
        "Custom plugin id (Enter to add)",
        &wizard.custom_plugin_input,
        "",
        is(Field::CustomPluginInput),
        focused_line,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    fn draw(wizard: &AgentWizard) -> String {
        let backend = TestBackend::new(80, 60);
        let mut terminal = Terminal::new(backend).expect("terminal");
        terminal
            .draw(|f| render_wizard(f, wizard))
            .expect("draw");
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_progress_dots() {
        assert_eq!(render_progress_dots(WizardStep::Basic), "● ○ ◌ ○");
        assert_eq!(render_progress_dots(WizardStep::Review), "● ● ● ●");
    }

    #[test]
    fn test_basic_step_renders_fields() {
        let mut wizard = AgentWizard::default();
        wizard.draft.name = "AlphaTrader".to_string();
        let screen = draw(&wizard);
        assert!(screen.contains("Step 1: Basic Information"));
        assert!(screen.contains("AlphaTrader"));
        assert!(screen.contains("Direct Chat"));
    }

    #[test]
    fn test_review_step_renders_summary_and_error() {
        let mut wizard = AgentWizard::default();
        wizard.go_to_step(4);
        wizard.request_create();
        let screen = draw(&wizard);
        assert!(screen.contains("Review & Create"));
        assert!(screen.contains("Not set"));
        assert!(screen.contains("Agent name is required"));
    }
}
