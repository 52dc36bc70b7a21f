use crate::color::Hsb;

/// Keymap-facing underglow command
///
/// Directions are signed step counts; negative moves backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UnderglowCommand {
    On,
    Off,
    Toggle,
    /// Select effect by raw id
    SelectEffect(u8),
    CycleEffect(i8),
    SetColor(Hsb),
    ChangeHue(i8),
    ChangeSat(i8),
    ChangeBrt(i8),
    ChangeSpeed(i8),
    /// Show the status overlay
    ShowStatus,
}
