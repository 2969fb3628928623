//! Prompts that fill in the shared form, one action at a time.
//!
//! Every prompt starts from the value already in the form, so a second run
//! of an action only needs Enter for the fields that stay the same. All
//! prompts return `Ok(false)` when the user backs out with Esc or Ctrl+C.

use console::Style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, MultiSelect};
use imagechef_core::FormValues;

use super::handle_interrupt;

/// Effects in pipeline order, as shown in the checklist.
pub const EFFECTS: [&str; 6] = ["Dither", "Pixelate", "Resize", "Rotate", "Blur", "Mirror"];

/// Current effect checkboxes, in [`EFFECTS`] order.
pub fn effect_flags(form: &FormValues) -> [bool; 6] {
    [
        form.dither,
        form.pixelate,
        form.resize,
        form.rotate,
        form.blur,
        form.mirror,
    ]
}

/// Tick exactly the effects at `selected` indices.
pub fn set_effects(form: &mut FormValues, selected: &[usize]) {
    let on = |i: usize| selected.contains(&i);
    form.dither = on(0);
    form.pixelate = on(1);
    form.resize = on(2);
    form.rotate = on(3);
    form.blur = on(4);
    form.mirror = on(5);
}

/// Ask for a text field, pre-filled with its current value.
fn prompt(theme: &ColorfulTheme, label: &str, value: &mut String) -> anyhow::Result<bool> {
    let entered = handle_interrupt(
        Input::<String>::with_theme(theme)
            .with_prompt(label)
            .with_initial_text(value.clone())
            .allow_empty(true)
            .interact_text(),
    )?;
    match entered {
        Some(text) => {
            *value = text;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Input folder, output folder, effect checklist and each ticked effect's
/// arguments.
pub fn fill_process(theme: &ColorfulTheme, form: &mut FormValues) -> anyhow::Result<bool> {
    if !prompt(theme, "Input folder", &mut form.input_folder)? {
        return Ok(false);
    }
    if !prompt(
        theme,
        "Output folder (empty overwrites the inputs)",
        &mut form.output_folder,
    )? {
        return Ok(false);
    }

    let Some(selected) = MultiSelect::with_theme(theme)
        .with_prompt("Effects (space toggles, enter confirms)")
        .items(&EFFECTS)
        .defaults(&effect_flags(form))
        .interact_opt()?
    else {
        return Ok(false);
    };
    set_effects(form, &selected);

    let fields: [(bool, &str, &mut String); 6] = [
        (form.dither, "Number of colors", &mut form.num_colors),
        (form.pixelate, "Pixelate factor", &mut form.pixelate_factor),
        (form.resize, "Width", &mut form.width),
        (form.resize, "Height", &mut form.height),
        (form.rotate, "Angle (degrees, clockwise)", &mut form.angle),
        (form.blur, "Blur radius", &mut form.blur_radius),
    ];
    for (enabled, label, value) in fields {
        if enabled && !prompt(theme, label, value)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Input folder, MP4 path and frame rate.
pub fn fill_mp4(theme: &ColorfulTheme, form: &mut FormValues) -> anyhow::Result<bool> {
    Ok(prompt(theme, "Input folder (frames)", &mut form.input_folder)?
        && prompt(theme, "MP4 output file", &mut form.mp4_path)?
        && prompt(theme, "FPS", &mut form.fps)?)
}

/// Output folder, GIF path, frame duration and loop count. Frames come from
/// the output folder.
pub fn fill_gif(theme: &ColorfulTheme, form: &mut FormValues) -> anyhow::Result<bool> {
    Ok(
        prompt(theme, "Output folder (frames)", &mut form.output_folder)?
            && prompt(theme, "GIF output file", &mut form.gif_path)?
            && prompt(theme, "Frame duration (ms)", &mut form.gif_duration)?
            && prompt(theme, "Loop count (0 = forever)", &mut form.gif_loop)?,
    )
}

/// Print every form field.
pub fn print_form(form: &FormValues) {
    let label = Style::new().for_stderr().bold();
    let dim = Style::new().for_stderr().dim();
    let cyan = Style::new().for_stderr().cyan();
    let or_dash = |s: &str| {
        if s.trim().is_empty() {
            dim.apply_to("-".to_string()).to_string()
        } else {
            s.to_string()
        }
    };

    let ticked: Vec<&str> = EFFECTS
        .iter()
        .zip(effect_flags(form))
        .filter_map(|(name, on)| on.then_some(*name))
        .collect();

    eprintln!();
    eprintln!("  {}", cyan.apply_to("Current form:"));
    eprintln!();
    let rows = [
        ("Input folder:", or_dash(&form.input_folder)),
        ("Output folder:", or_dash(&form.output_folder)),
        (
            "Effects:",
            if ticked.is_empty() {
                "none".to_string()
            } else {
                ticked.join(", ")
            },
        ),
        ("Colors:", form.num_colors.clone()),
        ("Pixelate factor:", form.pixelate_factor.clone()),
        ("Size:", format!("{}x{}", form.width, form.height)),
        ("Angle:", form.angle.clone()),
        ("Blur radius:", form.blur_radius.clone()),
        ("MP4 file:", or_dash(&form.mp4_path)),
        ("FPS:", form.fps.clone()),
        ("GIF file:", or_dash(&form.gif_path)),
        ("GIF duration:", format!("{} ms", form.gif_duration)),
        ("GIF loop:", form.gif_loop.clone()),
    ];
    for (name, value) in rows {
        eprintln!("    {:<20} {}", label.apply_to(name), value);
    }
    eprintln!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use imagechef_core::config::FormDefaults;

    #[test]
    fn test_set_effects_round_trips_flags() {
        let mut form = FormValues::with_defaults(&FormDefaults::default());
        set_effects(&mut form, &[0, 3, 5]);
        assert_eq!(
            effect_flags(&form),
            [true, false, false, true, false, true]
        );
    }

    #[test]
    fn test_set_effects_clears_unselected() {
        let mut form = FormValues {
            blur: true,
            pixelate: true,
            ..Default::default()
        };
        set_effects(&mut form, &[]);
        assert_eq!(effect_flags(&form), [false; 6]);
    }
}
