// 地理位置类型
// 开发心理：机制层只需要携带经纬度，位移计算属于请求层

use serde::{Deserialize, Serialize};

// 经纬度坐标（度）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lng: f64,
}

impl GeoLocation {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    // 坐标是否在有效值域内
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validity() {
        assert!(GeoLocation::new(-22.9, -43.2).is_valid());
        assert!(!GeoLocation::new(91.0, 0.0).is_valid());
        assert!(!GeoLocation::new(0.0, -181.0).is_valid());
    }

    #[test]
    fn test_document_shape() {
        let loc = GeoLocation::new(10.5, 20.25);
        let doc = serde_json::to_value(&loc).unwrap();
        assert_eq!(doc["lat"], 10.5);
        assert_eq!(doc["lng"], 20.25);
    }
}
