use super::data::{Media, Photographer};
use crate::error::{PortfolioError, PortfolioResult};

/// Counters after a toggle, read back from the entities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeChange {
    pub media_id: u32,
    pub media_likes: u32,
    pub total_likes: u32,
    pub is_liked: bool,
}

/// Flip the like state of `media` and move both counters by one.
///
/// Both new values are computed before anything is written, so either the
/// media count and the photographer aggregate change together or neither does.
pub fn toggle(media: &mut Media, photographer: &mut Photographer) -> PortfolioResult<LikeChange> {
    let (media_likes, total_likes) = if media.is_liked {
        (
            media.likes.checked_sub(1),
            photographer.total_likes.checked_sub(1),
        )
    } else {
        (
            media.likes.checked_add(1),
            photographer.total_likes.checked_add(1),
        )
    };

    let (Some(media_likes), Some(total_likes)) = (media_likes, total_likes) else {
        return Err(PortfolioError::InvalidState(format!(
            "like counters out of range for media {} (likes {}, total {})",
            media.id, media.likes, photographer.total_likes
        )));
    };

    media.likes = media_likes;
    media.is_liked = !media.is_liked;
    photographer.total_likes = total_likes;

    Ok(LikeChange {
        media_id: media.id,
        media_likes: media.likes,
        total_likes: photographer.total_likes,
        is_liked: media.is_liked,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::MediaKind;
    use chrono::NaiveDate;

    fn photographer(total_likes: u32) -> Photographer {
        Photographer {
            id: 1,
            name: "Tracy Galindo".to_string(),
            city: "Montreal".to_string(),
            country: "Canada".to_string(),
            tagline: "Photographe freelance".to_string(),
            price: 500,
            portrait: "TracyGalindo.jpg".to_string(),
            total_likes,
        }
    }

    fn media(likes: u32) -> Media {
        Media {
            id: 10,
            photographer_id: 1,
            title: "Horseshoe".to_string(),
            date: NaiveDate::from_ymd_opt(2011, 12, 8).unwrap(),
            price: 40,
            likes,
            kind: MediaKind::Image("horseshoe.jpg".to_string()),
            is_liked: false,
        }
    }

    #[test]
    fn test_toggle_moves_both_counters() {
        let mut m = media(3);
        let mut p = photographer(8);

        let change = toggle(&mut m, &mut p).unwrap();
        assert_eq!(
            change,
            LikeChange {
                media_id: 10,
                media_likes: 4,
                total_likes: 9,
                is_liked: true
            }
        );
        assert!(m.is_liked);
    }

    #[test]
    fn test_double_toggle_restores_counters() {
        let mut m = media(3);
        let mut p = photographer(8);

        toggle(&mut m, &mut p).unwrap();
        toggle(&mut m, &mut p).unwrap();

        assert_eq!(m.likes, 3);
        assert_eq!(p.total_likes, 8);
        assert!(!m.is_liked);
    }

    #[test]
    fn test_out_of_range_changes_nothing() {
        // Aggregate already at the ceiling, the media count must not move either
        let mut m = media(3);
        let mut p = photographer(u32::MAX);

        assert!(matches!(
            toggle(&mut m, &mut p),
            Err(PortfolioError::InvalidState(_))
        ));
        assert_eq!(m.likes, 3);
        assert!(!m.is_liked);
        assert_eq!(p.total_likes, u32::MAX);
    }
}
