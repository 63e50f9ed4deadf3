// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

#[cfg(test)]
mod tests {
    use github_telex::utils::telemetry;

    #[test]
    fn test_telemetry_initialization_is_idempotent() {
        telemetry::init_telemetry();
        // A second call must not panic
        telemetry::init_telemetry();

        tracing::info!(
            event = "push",
            delivery = "72d3162e-cc78-11e3-81ab-4c9367dc0958",
            "GitHub event queued for Telex"
        );
        tracing::error!(reason = "http_error", "Failed to send message to Telex");
    }
}
