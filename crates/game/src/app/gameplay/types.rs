#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub(crate) enum PursuerRole {
    Teacher,
    Surgeon,
    Orderly,
}

impl PursuerRole {
    fn as_label(self) -> &'static str {
        match self {
            Self::Teacher => "teacher",
            Self::Surgeon => "surgeon",
            Self::Orderly => "orderly",
        }
    }

    fn tint(self) -> [u8; 4] {
        match self {
            Self::Teacher => [170, 0, 0, 255],
            Self::Surgeon => [64, 160, 160, 255],
            Self::Orderly => [170, 150, 40, 255],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct PursuerId(pub(crate) u32);

/// Uniform pursuer shape: identity, planar position, and a role tag that
/// only varies the capture message and marker tint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Pursuer {
    pub(crate) id: PursuerId,
    pub(crate) position: Vec2,
    pub(crate) role: PursuerRole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    Escaped,
    Caught(PursuerRole),
}

impl Outcome {
    fn banner_text(self) -> String {
        match self {
            Self::Escaped => "You escaped detention!".to_string(),
            Self::Caught(role) => {
                format!("You were stabbed by the {}...", role.as_label())
            }
        }
    }
}

/// Session phase. Movement, pursuit, and the win check run only in
/// `Playing`; the cutscene phases suspend gameplay but never the render
/// path; `Ended` is terminal and leads to a whole-session restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SessionPhase {
    NotStarted,
    Playing,
    Dragging,
    Cutscene,
    Ended,
}
