#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    KeyboardCharInput(char),
    KeyboardCTRLC,
    KeyboardDown,
    KeyboardEnter,
    KeyboardOther,
    KeyboardSpace,
    KeyboardUp,
    UIResize(u16, u16),
}
