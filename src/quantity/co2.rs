quantity!(
    /// CO₂ emission intensity of the consumed energy.
    GramsPerKilowattHour, "g/kWh", 0
);
