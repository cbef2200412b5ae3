//! Static function registry: per-function metadata used by the preview step.
//! Built once, immutable, process-wide. Functions 1–26 have specific names
//! and expected ranges from the known export family; 27–128 share a generic
//! placeholder whose range is narrower than the validator's 0–999 bound.
//! That mismatch is inherited behavior and kept as-is.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionDefinition {
    pub number: u32,
    pub name: &'static str,
    pub description: &'static str,
    /// Inclusive (min, max) the vendor documentation expects for this field.
    pub expected_range: (u32, u32),
}

const GENERIC: FunctionDefinition = FunctionDefinition {
    number: 0,
    name: "Vendor Parameter",
    description: "Vendor-specific parameter; meaning varies by export family",
    expected_range: (0, 255),
};

static DEFINITIONS: &[FunctionDefinition] = &[
    def(1, "MPH Scaling", "Speedometer scaling factor for the drive wheel", (0, 150)),
    def(2, "Minimum Speed", "Speed at the low end of the speed pot", (0, 100)),
    def(3, "Controlled Acceleration", "Ramp rate when the throttle is advanced", (0, 80)),
    def(4, "Controlled Deceleration", "Ramp rate when the throttle is released", (0, 80)),
    def(5, "Emergency Deceleration", "Ramp rate for emergency reverse and inhibit", (0, 80)),
    def(6, "Forward Speed Limit", "Maximum forward speed as percent of full", (0, 100)),
    def(7, "Reverse Speed Limit", "Maximum reverse speed as percent of full", (0, 75)),
    def(8, "Turn Speed Limit", "Speed cap while the steering sensor is off-center", (0, 100)),
    def(9, "Throttle Deadband", "Wiper travel ignored around neutral", (0, 50)),
    def(10, "Throttle Full Scale", "Wiper travel treated as full throttle", (0, 100)),
    def(11, "Current Limit", "Main armature current limit", (0, 999)),
    def(12, "Boost Current Limit", "Short-duration current limit for obstacle climb", (0, 999)),
    def(13, "Plug Current Limit", "Current limit during plug braking", (0, 500)),
    def(14, "Battery Amp Limit", "Battery-side current limit", (0, 500)),
    def(15, "Battery Volts", "Nominal battery pack voltage", (0, 36)),
    def(16, "Low Voltage Cutback", "Pack voltage where output starts folding back", (0, 36)),
    def(17, "High Voltage Cutback", "Pack voltage where regen is limited", (0, 48)),
    def(18, "Motor Resistance", "Armature resistance compensation term", (0, 250)),
    def(19, "IR Compensation", "Speed compensation under load", (0, 250)),
    def(20, "Load Compensation", "Extra drive under measured load", (0, 250)),
    def(21, "Main Contactor Delay", "Delay before the main contactor drops out", (0, 250)),
    def(22, "Brake Release Delay", "Delay between drive and electromagnetic brake", (0, 250)),
    def(23, "Sleep Timeout", "Idle time before the controller powers down", (0, 600)),
    def(24, "Beeper Volume", "Volume of the reverse/fault beeper", (0, 10)),
    def(25, "Speed Pot Minimum", "Calibrated low end of the speed pot", (0, 100)),
    def(26, "Speed Pot Maximum", "Calibrated high end of the speed pot", (0, 100)),
];

const fn def(
    number: u32,
    name: &'static str,
    description: &'static str,
    expected_range: (u32, u32),
) -> FunctionDefinition {
    FunctionDefinition {
        number,
        name,
        description,
        expected_range,
    }
}

/// Definition for a function number, falling back to the shared generic
/// placeholder for 27–128 (and anything else a caller asks about).
pub fn definition(number: u32) -> FunctionDefinition {
    DEFINITIONS
        .iter()
        .find(|d| d.number == number)
        .copied()
        .unwrap_or(FunctionDefinition { number, ..GENERIC })
}

/// The specifically named definitions (functions 1–26), in order.
pub fn named_definitions() -> &'static [FunctionDefinition] {
    DEFINITIONS
}
