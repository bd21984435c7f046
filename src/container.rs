use crate::region::Rect;

/// Simulation box with reflecting walls on every side
#[derive(Clone, Copy, Debug)]
pub struct Container {
    rect: Rect,
}
impl Container {
    pub fn new(rect: Rect) -> Self {
        Self { rect }
    }
    /// The `[0, 1] x [0, 1]` box every run uses
    pub fn unit() -> Self {
        Self::new(Rect::unit())
    }

    /// Mirror every coordinate that left the box back inside, negating the
    /// matching velocity and acceleration components.
    ///
    /// Only one reflection per wall is applied; a particle that would need
    /// several in a single step is left wherever one mirror puts it.
    pub fn apply_reflect(
        &self,
        positions: &mut [[f64; 2]],
        velocities: &mut [[f64; 2]],
        accelerations: &mut [[f64; 2]],
    ) {
        let bounds = [self.rect.bounds(0), self.rect.bounds(1)];
        for ((x, v), a) in positions
            .iter_mut()
            .zip(velocities.iter_mut())
            .zip(accelerations.iter_mut())
        {
            for (axis, [lo, hi]) in bounds.iter().enumerate() {
                if x[axis] < *lo {
                    reflect(*lo, &mut x[axis], &mut v[axis], &mut a[axis]);
                }
                if x[axis] > *hi {
                    reflect(*hi, &mut x[axis], &mut v[axis], &mut a[axis]);
                }
            }
        }
    }
}

fn reflect(wall: f64, x: &mut f64, v: &mut f64, a: &mut f64) {
    *x = 2.0 * wall - *x;
    *v = -*v;
    *a = -*a;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn mirrors_below_lower_wall() {
        let container = Container::unit();
        let mut x = [[-0.01, 0.5]];
        let mut v = [[-2.0, 1.0]];
        let mut a = [[3.0, -1.0]];
        container.apply_reflect(&mut x, &mut v, &mut a);
        assert_relative_eq!(x[0][0], 0.01);
        assert_eq!(v[0], [2.0, 1.0]);
        assert_eq!(a[0], [-3.0, -1.0]);
        assert_eq!(x[0][1], 0.5);
    }

    #[test]
    fn mirrors_above_upper_wall_on_both_axes() {
        let container = Container::unit();
        let mut x = [[1.02, 1.5e-3 + 1.0]];
        let mut v = [[1.0, 4.0]];
        let mut a = [[0.0, -1.0]];
        container.apply_reflect(&mut x, &mut v, &mut a);
        assert_relative_eq!(x[0][0], 0.98, max_relative = 1e-12);
        assert_relative_eq!(x[0][1], 1.0 - 1.5e-3, max_relative = 1e-12);
        assert_eq!(v[0], [-1.0, -4.0]);
        assert_eq!(a[0], [-0.0, 1.0]);
    }

    #[test]
    fn leaves_interior_untouched() {
        let container = Container::unit();
        let mut x = [[0.25, 0.75], [0.0, 1.0]];
        let mut v = [[1.0, -1.0], [-1.0, 1.0]];
        let mut a = [[0.5, -0.5], [0.0, -1.0]];
        let (x0, v0, a0) = (x, v, a);
        container.apply_reflect(&mut x, &mut v, &mut a);
        assert_eq!(x, x0);
        assert_eq!(v, v0);
        assert_eq!(a, a0);
    }
}
