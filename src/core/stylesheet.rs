//! Renders a [`StyleBundle`] into the dashboard's adaptive stylesheet.

use crate::core::theme::StyleBundle;
use chrono::SecondsFormat;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub fn month_name(month: i32) -> &'static str {
    usize::try_from(month)
        .ok()
        .and_then(|m| m.checked_sub(1))
        .and_then(|i| MONTH_NAMES.get(i).copied())
        .unwrap_or("Unknown")
}

pub fn render(bundle: &StyleBundle) -> String {
    let theme = &bundle.theme;
    let inputs = &theme.inputs;
    let scene = &theme.scene;
    let palette = &theme.palette;
    let derived = &theme.derived;

    format!(
        "/* Generated: {generated}
 * Hour: {hour} ({time}), Month: {month}, Day: {day}
 * Weather: {condition}, {temperature}
 * Vibe: {vibe}
 */

:root {{
  /* Core colors - {time} {season} {mood} palette */
  --bg-primary: {bg_primary};
  --bg-secondary: {bg_secondary};
  --bg-card: {bg_card};
  --bg-glass: {bg_glass};

  /* Text colors */
  --text-primary: {text_primary};
  --text-secondary: {text_secondary};
  --text-muted: {text_muted};

  /* Accent colors */
  --accent-primary: {accent_primary};
  --accent-secondary: {accent_secondary};
  --accent-glow: {accent_glow};
  --accent-cool: {accent_cool};

  /* Seasonal accents */
  {seasonal}

  /* Effects */
  --shadow-soft: {shadow_soft};
  --shadow-medium: {shadow_medium};
  --shadow-glow: {shadow_glow};
  --border-subtle: {border_subtle};
  --overlay: {overlay};
}}

/* Base styles */
body {{
  background: var(--bg-primary);
  color: var(--text-primary);
  transition: all 0.5s ease;
  position: relative;
}}

/* Atmospheric overlay */
body::before {{
  content: '';
  position: fixed;
  top: 0;
  left: 0;
  right: 0;
  bottom: 0;
  {atmosphere}
  pointer-events: none;
  z-index: -1;
}}

/* Card/Container styles */
.card, .container, article {{
  background: var(--bg-card);
  backdrop-filter: blur(12px);
  border: 1px solid var(--border-subtle);
  border-radius: 16px;
  box-shadow: var(--shadow-medium);
  transition: all 0.3s ease;
}}

.card:hover, article:hover {{
  box-shadow: var(--shadow-glow), var(--shadow-medium);
  border-color: {hover_border};
  transform: translateY(-2px);
}}

/* Links and interactive elements */
a {{
  color: var(--accent-primary);
  text-decoration: none;
  transition: all 0.2s ease;
  position: relative;
}}

a:hover {{
  color: var(--accent-glow);
  text-shadow: 0 0 20px {link_glow};
}}

a::after {{
  content: '';
  position: absolute;
  bottom: -2px;
  left: 0;
  width: 0;
  height: 2px;
  background: var(--accent-secondary);
  transition: width 0.3s ease;
}}

a:hover::after {{
  width: 100%;
}}

/* Buttons */
button, .button {{
  background: linear-gradient(135deg, var(--accent-primary) 0%, var(--accent-secondary) 100%);
  color: {button_text};
  border: none;
  border-radius: 8px;
  padding: 12px 24px;
  font-weight: 600;
  cursor: pointer;
  box-shadow: var(--shadow-soft);
  transition: all 0.3s ease;
}}

button:hover, .button:hover {{
  transform: translateY(-2px);
  box-shadow: var(--shadow-glow), var(--shadow-soft);
  filter: brightness(1.1);
}}

/* Headers */
h1, h2, h3 {{
  color: var(--text-primary);
  text-shadow: {heading_shadow};
}}

h1 {{
  background: linear-gradient(135deg, var(--accent-glow) 0%, var(--accent-secondary) 100%);
  -webkit-background-clip: text;
  -webkit-text-fill-color: transparent;
  background-clip: text;
}}

{effect}

/* Glass morphism elements */
.glass {{
  background: var(--bg-glass);
  backdrop-filter: blur(20px) saturate(150%);
  border: 1px solid var(--border-subtle);
  box-shadow: var(--shadow-soft);
}}

/* Code blocks */
pre, code {{
  background: {code_background};
  border: 1px solid var(--border-subtle);
  border-radius: 8px;
  color: var(--accent-glow);
}}

/* Status indicators */
.status-active {{
  color: var(--accent-primary);
  text-shadow: 0 0 10px {status_glow};
}}

.status-info {{
  color: var(--accent-cool);
}}

/* Responsive adjustments */
@media (max-width: 768px) {{
  :root {{
    --shadow-soft: {shadow_soft_compact};
    --shadow-medium: {shadow_medium_compact};
  }}
}}

/* Smooth transitions for theme changes */
* {{
  transition-property: background-color, border-color, color, box-shadow;
  transition-duration: 0.3s;
  transition-timing-function: ease;
}}
",
        generated = bundle
            .generated_at_utc
            .to_rfc3339_opts(SecondsFormat::Millis, true),
        hour = inputs.hour,
        time = scene.time_of_day,
        month = month_name(inputs.month),
        day = inputs.day_of_year,
        condition = inputs.condition,
        temperature = inputs.temperature_label(),
        vibe = theme.vibe,
        season = scene.season,
        mood = scene.weather_mood,
        bg_primary = palette.bg_primary,
        bg_secondary = palette.bg_secondary,
        bg_card = palette.bg_card,
        bg_glass = derived.bg_glass,
        text_primary = palette.text_primary,
        text_secondary = palette.text_secondary,
        text_muted = derived.text_muted,
        accent_primary = palette.accent_primary,
        accent_secondary = palette.accent_secondary,
        accent_glow = palette.accent_glow,
        accent_cool = derived.accent_cool,
        seasonal = theme.seasonal.css_variables(),
        shadow_soft = derived.shadow_soft,
        shadow_medium = derived.shadow_medium,
        shadow_glow = derived.shadow_glow,
        border_subtle = derived.border_subtle,
        overlay = derived.overlay,
        atmosphere = theme.atmospheric_overlay,
        hover_border = derived.hover_border,
        link_glow = derived.link_glow,
        button_text = derived.button_text,
        heading_shadow = derived.heading_shadow,
        effect = theme.weather_effect,
        code_background = derived.code_background,
        status_glow = derived.status_glow,
        shadow_soft_compact = derived.shadow_soft_compact,
        shadow_medium_compact = derived.shadow_medium_compact,
    )
}
