impl Pursuer {
    /// Straight-line seek toward the target with no obstacle avoidance;
    /// the epsilon keeps the step stable at point-blank range.
    fn seek_step(&mut self, target: Vec2, speed: f32, epsilon: f32, dt_seconds: f32) {
        let direction = target.minus(self.position).normalized_or_zero(epsilon);
        if direction == Vec2::ZERO {
            return;
        }
        self.position = self.position.plus(direction.scaled(speed * dt_seconds));
    }
}

fn spawn_pursuers(level: &LevelConfig) -> Vec<Pursuer> {
    level
        .pursuers
        .iter()
        .enumerate()
        .map(|(index, pursuer)| Pursuer {
            id: PursuerId(index as u32),
            position: pursuer.spawn.to_vec2(),
            role: pursuer.role,
        })
        .collect()
}
