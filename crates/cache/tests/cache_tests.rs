use oracle_cache::mem::MemGeoCache;
use oracle_core::cache::error::CacheError;
use oracle_core::cache::port::GeoCache;
use oracle_core::geo::entity::Coordinates;
use std::sync::Arc;

fn tokyo() -> Coordinates {
    Coordinates {
        latitude: 35.6762,
        longitude: 139.6503,
    }
}

#[tokio::test]
async fn test_mem_geo_cache_ops() {
    let cache = MemGeoCache::new();

    // 测试存取
    cache.put("Tokyo", tokyo()).await.unwrap();
    let result = cache.get("Tokyo").await.unwrap();
    assert_eq!(result, Some(tokyo()));

    // 测试删除
    cache.del("Tokyo").await.unwrap();
    let result = cache.get("Tokyo").await.unwrap();
    assert!(result.is_none());
    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_keys_are_normalized() {
    let cache = MemGeoCache::new();
    cache.put("  TOKYO ", tokyo()).await.unwrap();

    assert_eq!(cache.get("tokyo").await.unwrap(), Some(tokyo()));
    assert_eq!(cache.get("Tokyo").await.unwrap(), Some(tokyo()));
    assert_eq!(cache.len(), 1);

    // 同名键覆盖
    let moved = Coordinates {
        latitude: 0.0,
        longitude: 0.0,
    };
    cache.put("tokyo", moved).await.unwrap();
    assert_eq!(cache.get("TOKYO").await.unwrap(), Some(moved));
    assert_eq!(cache.len(), 1);
}

#[tokio::test]
async fn test_blank_key_rejected() {
    let cache = MemGeoCache::new();
    let err = cache.put("   ", tokyo()).await.unwrap_err();
    assert!(matches!(err, CacheError::InvalidKey(_)));
    assert!(cache.get("").await.is_err());
}

#[tokio::test]
async fn test_concurrent_writers() {
    let cache = Arc::new(MemGeoCache::new());
    let mut handles = Vec::new();
    for i in 0..16_u32 {
        let cache = cache.clone();
        handles.push(tokio::spawn(async move {
            let coords = Coordinates {
                latitude: f64::from(i),
                longitude: f64::from(i) * 2.0,
            };
            cache.put(&format!("city-{i}"), coords).await.unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(cache.len(), 16);
    let seven = cache.get("CITY-7").await.unwrap().unwrap();
    assert_eq!(seven.longitude, 14.0);
}
