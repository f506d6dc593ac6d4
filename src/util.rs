use enum_map::Enum;
use ratatui::layout::{Flex, Layout, Rect, Size};

/// Return a `Rect` of the given size centred within `area`.  If `area` is too
/// small, the result is clipped to it.
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let [rect] = Layout::horizontal([size.width])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::vertical([size.height])
        .flex(Flex::Center)
        .areas(rect);
    rect
}

/// Iteration & stepping over the variants of an [`Enum`]
pub(crate) trait EnumExt: Enum + Copy {
    fn iter() -> impl Iterator<Item = Self> {
        (0..Self::LENGTH).map(Self::from_usize)
    }

    fn min() -> Self {
        Self::from_usize(0)
    }

    fn max() -> Self {
        Self::from_usize(Self::LENGTH.saturating_sub(1))
    }

    fn next(self) -> Option<Self> {
        let i = self.into_usize().saturating_add(1);
        (i < Self::LENGTH).then(|| Self::from_usize(i))
    }

    fn prev(self) -> Option<Self> {
        self.into_usize().checked_sub(1).map(Self::from_usize)
    }
}

impl<T: Enum + Copy> EnumExt for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
    enum Color {
        Red,
        Green,
        Blue,
    }

    #[test]
    fn enum_iter() {
        assert_eq!(
            Color::iter().collect::<Vec<_>>(),
            [Color::Red, Color::Green, Color::Blue]
        );
        assert_eq!(Color::min(), Color::Red);
        assert_eq!(Color::max(), Color::Blue);
    }

    #[rstest]
    #[case(Color::Red, Some(Color::Green), None)]
    #[case(Color::Green, Some(Color::Blue), Some(Color::Red))]
    #[case(Color::Blue, None, Some(Color::Green))]
    fn enum_step(#[case] c: Color, #[case] next: Option<Color>, #[case] prev: Option<Color>) {
        assert_eq!(c.next(), next);
        assert_eq!(c.prev(), prev);
    }

    #[rstest]
    #[case(Rect::new(0, 0, 65, 24), Size::new(65, 24), Rect::new(0, 0, 65, 24))]
    #[case(Rect::new(0, 0, 10, 10), Size::new(4, 2), Rect::new(3, 4, 4, 2))]
    fn test_center_rect(#[case] area: Rect, #[case] size: Size, #[case] r: Rect) {
        assert_eq!(center_rect(area, size), r);
    }
}
