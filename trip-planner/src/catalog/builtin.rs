//! Destinations listed before anything has been saved.

use crate::domain::{Money, PlaceId};

use super::{Destination, DestinationCatalog, DestinationInfo};

#[allow(clippy::too_many_arguments)]
fn destination(
    id: u32,
    name: &str,
    location: &str,
    kind: &str,
    rating: f64,
    price: u64,
    description: &str,
    activities: [&str; 3],
    best_time: &str,
) -> Destination {
    let mut info = DestinationInfo::new(name, location, kind, rating, Money(price));
    info.description = Some(description.to_string());
    info.activities = activities.iter().map(|a| a.to_string()).collect();
    info.best_time_to_visit = Some(best_time.to_string());
    Destination {
        id: PlaceId(id),
        info,
    }
}

/// Ten well-known Vietnamese destinations, ids 1 to 10.
pub fn destinations() -> DestinationCatalog {
    DestinationCatalog::from(vec![
        destination(
            1,
            "Đà Nẵng",
            "Miền Trung, Việt Nam",
            "biển",
            4.5,
            1_000_000,
            "Thành phố biển xinh đẹp với bãi biển Mỹ Khê nổi tiếng và cầu Rồng độc đáo",
            ["Tắm biển", "Leo núi Ngũ Hành Sơn", "Tham quan Bà Nà Hills"],
            "Tháng 2 đến tháng 8",
        ),
        destination(
            2,
            "Hạ Long",
            "Miền Bắc, Việt Nam",
            "vịnh",
            4.8,
            2_000_000,
            "Vịnh Hạ Long là di sản thiên nhiên thế giới với hàng nghìn hòn đảo đá vôi",
            ["Du thuyền", "Khám phá hang động", "Chèo thuyền kayak"],
            "Tháng 10 đến tháng 4",
        ),
        destination(
            3,
            "Đà Lạt",
            "Tây Nguyên, Việt Nam",
            "núi",
            4.6,
            1_500_000,
            "Thành phố ngàn hoa với khí hậu mát mẻ quanh năm",
            ["Tham quan vườn hoa", "Chèo thuyền hồ Tuyền Lâm", "Cắm trại"],
            "Tháng 12 đến tháng 3",
        ),
        destination(
            4,
            "Phú Quốc",
            "Miền Nam, Việt Nam",
            "biển đảo",
            4.7,
            1_200_000,
            "Hòn đảo với bãi biển cát trắng và nhiều khu nghỉ dưỡng",
            ["Lặn biển ngắm san hô", "Câu cá", "Khám phá rừng nguyên sinh"],
            "Tháng 11 đến tháng 5",
        ),
        destination(
            5,
            "Hội An",
            "Miền Trung, Việt Nam",
            "phố cổ",
            4.9,
            1_700_000,
            "Phố cổ với kiến trúc độc đáo và các hoạt động văn hóa phong phú",
            ["Dạo phố đèn lồng", "Trải nghiệm ẩm thực", "May đo quần áo"],
            "Tháng 2 đến tháng 4",
        ),
        destination(
            6,
            "Sapa",
            "Miền Bắc, Việt Nam",
            "núi",
            4.6,
            1_900_000,
            "Thị trấn trong sương với những thửa ruộng bậc thang",
            ["Trekking", "Thăm bản làng dân tộc", "Chinh phục Fansipan"],
            "Tháng 9 đến tháng 11",
        ),
        destination(
            7,
            "Nha Trang",
            "Miền Trung, Việt Nam",
            "biển",
            4.4,
            3_000_000,
            "Thành phố biển sôi động với nhiều khu vui chơi giải trí",
            ["Lặn biển", "Vui chơi ở Vinpearl Land", "Tắm bùn khoáng"],
            "Tháng 6 đến tháng 8",
        ),
        destination(
            8,
            "Huế",
            "Miền Trung, Việt Nam",
            "di tích",
            4.5,
            1_600_000,
            "Cố đô với hệ thống di tích cung đình và ẩm thực độc đáo",
            ["Thăm Đại Nội", "Du thuyền sông Hương", "Thưởng thức ẩm thực Huế"],
            "Tháng 1 đến tháng 2",
        ),
        destination(
            9,
            "Mũi Né",
            "Miền Nam, Việt Nam",
            "biển",
            4.3,
            700_000,
            "Biển với những đồi cát vàng và hoàng hôn tuyệt đẹp",
            ["Lướt ván buồm", "Trượt cát", "Tham quan làng chài"],
            "Tháng 11 đến tháng 5",
        ),
        destination(
            10,
            "Ninh Bình",
            "Miền Bắc, Việt Nam",
            "di tích",
            4.7,
            900_000,
            "Vùng đất cổ kính với danh thắng Tràng An",
            ["Du thuyền Tràng An", "Thăm Tam Cốc - Bích Động", "Khám phá Hang Múa"],
            "Tháng 9 đến tháng 11",
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_one_to_ten() {
        let catalog = destinations();
        let ids: Vec<u32> = catalog.destinations().iter().map(|d| d.id.0).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn entries_are_valid() {
        for d in destinations().destinations() {
            assert!(d.info.validate().is_ok(), "{} is invalid", d.info.name);
            assert_eq!(d.info.activities.len(), 3);
            assert!(d.info.price > Money::ZERO);
        }
    }
}
