use ratatui::style::{Color, Modifier, Style};

pub const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub const INPUT_STYLE: Style = BASE_STYLE.add_modifier(Modifier::UNDERLINED);

pub const INPUT_FOCUS_STYLE: Style = INPUT_STYLE.fg(Color::LightCyan);

/// Text field style while the selection effect is active
pub const EFFECT_STYLE: Style = INPUT_STYLE
    .fg(Color::LightYellow)
    .add_modifier(Modifier::BOLD);

pub const BUTTON_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub const HEADING_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub const CAPTION_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

pub const SELECTED_STYLE: Style = BASE_STYLE.add_modifier(Modifier::REVERSED);
