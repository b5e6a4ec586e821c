pub struct DefaultsConfig {
    pub conserve_bonds: bool,
    pub conserve_ring_size: bool,
    pub unit: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            conserve_bonds: true,
            conserve_ring_size: true,
            unit: "kJ/mol".to_string(),
        }
    }
}
