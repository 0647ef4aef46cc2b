/// Height of the floating chat panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelHeight {
    /// Header bar only.
    Minimized,
    /// No conversation yet: a short panel above the page.
    Compact,
    /// Conversation in progress: almost full viewport.
    Expanded,
}

impl PanelHeight {
    pub fn for_state(minimized: bool, has_messages: bool) -> Self {
        if minimized {
            PanelHeight::Minimized
        } else if has_messages {
            PanelHeight::Expanded
        } else {
            PanelHeight::Compact
        }
    }

    pub fn panel_css(&self) -> &'static str {
        match self {
            PanelHeight::Minimized => "height: 48px;",
            PanelHeight::Compact => "height: 220px;",
            PanelHeight::Expanded => "height: calc(100vh - 40px);",
        }
    }

    /// Height of the scrolling message area inside the panel.
    pub fn body_css(&self) -> &'static str {
        match self {
            PanelHeight::Minimized => "height: 0;",
            PanelHeight::Compact => "height: calc(220px - 110px);",
            PanelHeight::Expanded => "height: calc(100vh - 150px);",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropDirection {
    Up,
    Down,
}

impl DropDirection {
    pub fn css_class(&self) -> &'static str {
        match self {
            DropDirection::Up => "drop-up",
            DropDirection::Down => "drop-down",
        }
    }
}

/// Opens upward only when the list does not fit below but does fit above.
pub fn dropdown_direction(space_below: f64, space_above: f64, required: f64) -> DropDirection {
    if space_below < required && space_above > required {
        DropDirection::Up
    } else {
        DropDirection::Down
    }
}

/// Tallest the plugin menu gets before it scrolls.
pub const PLUGIN_MENU_MAX_PX: f64 = 350.0;
pub const MODEL_MENU_MAX_PX: f64 = 300.0;

pub fn plugin_menu_height(plugin_count: usize) -> f64 {
    (plugin_count as f64 * 70.0 + 50.0).min(PLUGIN_MENU_MAX_PX)
}

pub fn model_menu_height(model_count: usize) -> f64 {
    (model_count as f64 * 60.0).min(MODEL_MENU_MAX_PX)
}

/// Inline cap for a menu, so it never grows past the height used to place it.
pub fn menu_style(max_px: f64) -> String {
    format!("max-height: {}px;", max_px)
}

pub fn plugin_dropdown_direction(space_below: f64, space_above: f64, plugin_count: usize) -> DropDirection {
    dropdown_direction(space_below, space_above, plugin_menu_height(plugin_count))
}

pub fn model_dropdown_direction(space_below: f64, space_above: f64, model_count: usize) -> DropDirection {
    dropdown_direction(space_below, space_above, model_menu_height(model_count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimized_wins_over_conversation_state() {
        assert_eq!(PanelHeight::for_state(true, true), PanelHeight::Minimized);
        assert_eq!(PanelHeight::for_state(true, false), PanelHeight::Minimized);
        assert_eq!(PanelHeight::for_state(false, true), PanelHeight::Expanded);
        assert_eq!(PanelHeight::for_state(false, false), PanelHeight::Compact);
    }

    #[test]
    fn dropdown_opens_up_only_when_room_above() {
        // 3 plugins need 260px.
        assert_eq!(plugin_dropdown_direction(100.0, 600.0, 3), DropDirection::Up);
        assert_eq!(plugin_dropdown_direction(100.0, 200.0, 3), DropDirection::Down);
        assert_eq!(plugin_dropdown_direction(300.0, 600.0, 3), DropDirection::Down);
    }

    #[test]
    fn dropdown_height_is_capped() {
        // 20 plugins would be 1450px, capped at 350.
        assert_eq!(plugin_dropdown_direction(360.0, 900.0, 20), DropDirection::Down);
        assert_eq!(plugin_dropdown_direction(340.0, 900.0, 20), DropDirection::Up);
    }

    #[test]
    fn model_list_uses_its_own_sizing() {
        // 4 models need 240px; 10 are capped at 300.
        assert_eq!(model_dropdown_direction(200.0, 500.0, 4), DropDirection::Up);
        assert_eq!(model_dropdown_direction(250.0, 500.0, 4), DropDirection::Down);
        assert_eq!(model_dropdown_direction(290.0, 500.0, 10), DropDirection::Up);
        assert_eq!(model_dropdown_direction(0.0, 0.0, 0), DropDirection::Down);
    }

    #[test]
    fn menu_cap_matches_placement_height() {
        assert_eq!(menu_style(MODEL_MENU_MAX_PX), "max-height: 300px;");
        assert_eq!(menu_style(PLUGIN_MENU_MAX_PX), "max-height: 350px;");
        assert_eq!(model_menu_height(50), MODEL_MENU_MAX_PX);
        assert_eq!(plugin_menu_height(50), PLUGIN_MENU_MAX_PX);
        // A capped menu that exactly fits below stays below.
        assert_eq!(model_dropdown_direction(MODEL_MENU_MAX_PX, 900.0, 50), DropDirection::Down);
        assert_eq!(plugin_dropdown_direction(PLUGIN_MENU_MAX_PX, 900.0, 50), DropDirection::Down);
    }
}
