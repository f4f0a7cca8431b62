quantity!(
    /// Energy price in the tariff currency per kilowatt-hour.
    KilowattHourPrice, "/kWh", 3
);
