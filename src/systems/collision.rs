use log::warn;

use crate::components::rect::Bounded;

/// Two boxes collide when their rectangles overlap by at least one pixel.
pub fn collides<A, B>(a: &A, b: &B) -> bool
where
    A: Bounded + ?Sized,
    B: Bounded + ?Sized,
{
    a.bounds().intersects(&b.bounds())
}

/// Like [`collides`], but `other` may be missing. A missing sprite never
/// collides; the lookup that produced it is reported.
pub fn collides_with<A, B>(a: &A, other: Option<&B>) -> bool
where
    A: Bounded + ?Sized,
    B: Bounded + ?Sized,
{
    match other {
        Some(b) => collides(a, b),
        None => {
            warn!("Collision test against a missing sprite");
            false
        }
    }
}

/// Indices of every member of `candidates` overlapping `a`.
pub fn collisions<'a, A, B>(a: &'a A, candidates: impl IntoIterator<Item = &'a B>) -> Vec<usize>
where
    A: Bounded + ?Sized,
    B: Bounded + 'a,
{
    candidates
        .into_iter()
        .enumerate()
        .filter(|(_, b)| collides(a, *b))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::rect::Rect;

    #[test]
    fn test_overlapping_boxes_collide() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        assert!(collides(&a, &b));
    }

    #[test]
    fn test_distant_boxes_do_not_collide() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(20, 20, 5, 5);
        assert!(!collides(&a, &b));
    }

    #[test]
    fn test_missing_sprite_never_collides() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(!collides_with::<Rect, Rect>(&a, None));
        assert!(collides_with(&a, Some(&Rect::new(1, 1, 2, 2))));
    }

    #[test]
    fn test_collisions_lists_indices() {
        let a = Rect::new(0, 0, 10, 10);
        let others = [
            Rect::new(50, 50, 5, 5),
            Rect::new(9, 9, 5, 5),
            Rect::new(-5, -5, 6, 6),
        ];
        assert_eq!(collisions(&a, others.iter()), vec![1, 2]);
    }
}
