/// Enumeration of the axes of the two-dimensional field plane.
///
/// Can be used to infallibly index field points and vectors.
///
/// * [`Axis::X`] runs along the length of the field (touchline direction).
/// * [`Axis::Y`] runs across the width of the field (goal-line direction).
#[expect(clippy::exhaustive_enums)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[allow(missing_docs)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Both axes in the standard order, [X, Y].
    pub const ALL: [Self; 2] = [Self::X, Self::Y];
}

mod impl_index_axis {
    use super::Axis;
    use core::ops;

    macro_rules! impl_xy_e {
        ($($type:tt)*) => {
            impl<T, U> ops::Index<Axis> for $($type)*<T, U> {
                type Output = T;

                #[inline]
                fn index(&self, index: Axis) -> &Self::Output {
                    match index {
                        Axis::X => &self.x,
                        Axis::Y => &self.y,
                    }
                }
            }
            impl<T, U> ops::IndexMut<Axis> for $($type)*<T, U> {
                #[inline]
                fn index_mut(&mut self, index: Axis) -> &mut Self::Output {
                    match index {
                        Axis::X => &mut self.x,
                        Axis::Y => &mut self.y,
                    }
                }
            }
        };
    }
    impl_xy_e!(euclid::Vector2D);
    impl_xy_e!(euclid::Point2D);
}
