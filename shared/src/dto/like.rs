/// Content that can be liked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LikeTarget {
    Post(i64),
    Event(i64),
}

impl LikeTarget {
    /// `/curtida/...` path for this content
    pub fn path(&self) -> String {
        match self {
            LikeTarget::Post(id) => format!("/curtida/postagem/{id}"),
            LikeTarget::Event(id) => format!("/curtida/evento/{id}"),
        }
    }
}
