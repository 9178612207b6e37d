//! Lookup resolver
//!
//! Request-path operations over a [`SwiftCodeStore`]. All code and country
//! arguments are normalized (trimmed, upper-cased) before they reach storage.
//!
//! A headquarters lookup is two independent reads: the record itself, then
//! the branches sharing its institution prefix. Concurrent writes between
//! the two reads may show up in the branch list.

use std::sync::Arc;

use tracing::{info, warn};

use crate::error::{Result, SwiftError};
use crate::models::{
    normalize_code, CountrySwiftCodes, HeadquarterView, NewSwiftCode, SwiftCode, SwiftCodeLookup,
};
use crate::store::SwiftCodeStore;

#[derive(Clone)]
pub struct SwiftCodeService {
    store: Arc<dyn SwiftCodeStore>,
}

impl SwiftCodeService {
    pub fn new(store: Arc<dyn SwiftCodeStore>) -> Self {
        Self { store }
    }

    /// Resolve one code. Headquarters come back with their branches; if the
    /// branch query fails the bare headquarters record is returned instead.
    pub async fn get_by_code(&self, raw_code: &str) -> Result<SwiftCodeLookup> {
        let code = normalize_code(raw_code);

        let record = self
            .store
            .find_by_code(&code)
            .await
            .map_err(SwiftError::StorageUnavailable)?
            .ok_or_else(|| SwiftError::CodeNotFound(code.clone()))?;

        if !record.is_headquarter {
            return Ok(SwiftCodeLookup::Record(record));
        }

        match self.store.find_branches(record.institution_prefix()).await {
            Ok(branches) => Ok(SwiftCodeLookup::Headquarter(HeadquarterView::new(
                record, branches,
            ))),
            Err(e) => {
                warn!("Branch lookup for {} failed, returning headquarters only: {:#}", code, e);
                Ok(SwiftCodeLookup::Record(record))
            }
        }
    }

    pub async fn get_all(&self) -> Result<Vec<SwiftCode>> {
        self.store
            .list_all()
            .await
            .map_err(SwiftError::StorageUnavailable)
    }

    pub async fn get_by_country(&self, raw_iso2: &str) -> Result<CountrySwiftCodes> {
        let iso2 = normalize_code(raw_iso2);

        let swift_codes = self
            .store
            .list_by_country(&iso2)
            .await
            .map_err(SwiftError::StorageUnavailable)?;

        let country_name = match swift_codes.first() {
            Some(first) => first.country_name.clone(),
            None => return Err(SwiftError::CountryNotFound(iso2)),
        };

        Ok(CountrySwiftCodes {
            country_iso2: iso2,
            country_name,
            swift_codes,
        })
    }

    /// Plain insert: unlike the CSV loader, a duplicate code is an error.
    pub async fn create(&self, record: NewSwiftCode) -> Result<SwiftCode> {
        let record = record.normalized();
        let created = self
            .store
            .insert(&record)
            .await
            .map_err(SwiftError::Storage)?;
        info!("Created SWIFT code {} (id {})", created.swift_code, created.id);
        Ok(created)
    }

    /// Returns the normalized code that was removed.
    pub async fn delete_by_code(&self, raw_code: &str) -> Result<String> {
        let code = normalize_code(raw_code);

        let removed = self
            .store
            .delete_by_code(&code)
            .await
            .map_err(SwiftError::Storage)?;
        if removed == 0 {
            return Err(SwiftError::CodeNotFound(code));
        }

        info!("Deleted SWIFT code {}", code);
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use async_trait::async_trait;

    use super::*;
    use crate::store::{InsertOutcome, MemoryStore, StoreResult};

    fn new_code(code: &str, iso2: &str, country: &str) -> NewSwiftCode {
        NewSwiftCode {
            swift_code: code.to_string(),
            bank_name: format!("Bank {code}"),
            address: "Street 1".to_string(),
            country_iso2: iso2.to_string(),
            country_name: country.to_string(),
        }
    }

    async fn seeded() -> (Arc<MemoryStore>, SwiftCodeService) {
        let store = Arc::new(MemoryStore::new());
        for (code, iso2, country) in [
            ("AAAABBPLXXX", "PL", "POLAND"),
            ("AAAABBPL001", "PL", "POLAND"),
            ("AAAABBPL002", "PL", "POLAND"),
            ("CCCCDDPLXXX", "PL", "POLAND"),
            ("BBBBDEFFXXX", "DE", "GERMANY"),
            ("AAAABBCC123", "DE", "GERMANY"),
        ] {
            store.insert(&new_code(code, iso2, country)).await.unwrap();
        }
        let service = SwiftCodeService::new(store.clone());
        (store, service)
    }

    /// Storage whose branch scan always fails.
    struct NoBranchStore(MemoryStore);

    #[async_trait]
    impl SwiftCodeStore for NoBranchStore {
        async fn find_by_code(&self, code: &str) -> StoreResult<Option<SwiftCode>> {
            self.0.find_by_code(code).await
        }
        async fn find_branches(&self, _prefix: &str) -> StoreResult<Vec<SwiftCode>> {
            Err(anyhow!("connection reset by peer"))
        }
        async fn list_all(&self) -> StoreResult<Vec<SwiftCode>> {
            Err(anyhow!("connection reset by peer"))
        }
        async fn list_by_country(&self, iso2: &str) -> StoreResult<Vec<SwiftCode>> {
            self.0.list_by_country(iso2).await
        }
        async fn insert(&self, record: &NewSwiftCode) -> StoreResult<SwiftCode> {
            self.0.insert(record).await
        }
        async fn insert_if_absent(&self, record: &NewSwiftCode) -> StoreResult<InsertOutcome> {
            self.0.insert_if_absent(record).await
        }
        async fn delete_by_code(&self, code: &str) -> StoreResult<u64> {
            self.0.delete_by_code(code).await
        }
    }

    #[tokio::test]
    async fn test_branch_lookup_returns_record() {
        let (_, service) = seeded().await;
        let lookup = service.get_by_code("AAAABBPL001").await.unwrap();
        match lookup {
            SwiftCodeLookup::Record(r) => {
                assert_eq!(r.swift_code, "AAAABBPL001");
                assert!(!r.is_headquarter);
            }
            other => panic!("expected plain record, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_headquarter_lookup_embeds_branches() {
        let (_, service) = seeded().await;
        let lookup = service.get_by_code("AAAABBPLXXX").await.unwrap();
        let branches: Vec<_> = lookup
            .branches()
            .expect("headquarters view")
            .iter()
            .map(|b| b.swift_code.clone())
            .collect();
        assert_eq!(branches, vec!["AAAABBPL001", "AAAABBPL002"]);
    }

    #[tokio::test]
    async fn test_headquarter_without_branches_has_empty_list() {
        let (_, service) = seeded().await;
        let lookup = service.get_by_code("CCCCDDPLXXX").await.unwrap();
        assert_eq!(lookup.branches(), Some(&[][..]));
    }

    #[tokio::test]
    async fn test_lookup_normalizes_code() {
        let (_, service) = seeded().await;
        let a = service.get_by_code(" aaaabbcc123 ").await.unwrap();
        let b = service.get_by_code("AAAABBCC123").await.unwrap();
        assert_eq!(a, b);
        assert_eq!(a.swift_code(), "AAAABBCC123");
    }

    #[tokio::test]
    async fn test_unknown_code_is_not_found() {
        let (_, service) = seeded().await;
        let err = service.get_by_code("INVALID123").await.unwrap_err();
        assert!(matches!(err, SwiftError::CodeNotFound(ref c) if c == "INVALID123"));
    }

    #[tokio::test]
    async fn test_branch_query_failure_falls_back_to_headquarter() {
        let inner = MemoryStore::new();
        inner
            .insert(&new_code("AAAABBPLXXX", "PL", "POLAND"))
            .await
            .unwrap();
        inner
            .insert(&new_code("AAAABBPL001", "PL", "POLAND"))
            .await
            .unwrap();
        let service = SwiftCodeService::new(Arc::new(NoBranchStore(inner)));

        let lookup = service.get_by_code("AAAABBPLXXX").await.unwrap();
        match lookup {
            SwiftCodeLookup::Record(r) => {
                assert_eq!(r.swift_code, "AAAABBPLXXX");
                assert!(r.is_headquarter);
            }
            other => panic!("expected bare headquarters, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_all_failure_is_storage_unavailable() {
        let service = SwiftCodeService::new(Arc::new(NoBranchStore(MemoryStore::new())));
        let err = service.get_all().await.unwrap_err();
        assert!(matches!(err, SwiftError::StorageUnavailable(_)));
        assert_eq!(err.http_status(), 500);
    }

    #[tokio::test]
    async fn test_get_all_in_storage_order() {
        let (_, service) = seeded().await;
        let all = service.get_all().await.unwrap();
        assert_eq!(all.len(), 6);
        assert_eq!(all[0].swift_code, "AAAABBPLXXX");
        assert_eq!(all[5].swift_code, "AAAABBCC123");
    }

    #[tokio::test]
    async fn test_get_by_country() {
        let (_, service) = seeded().await;
        let country = service.get_by_country(" de ").await.unwrap();
        assert_eq!(country.country_iso2, "DE");
        assert_eq!(country.country_name, "GERMANY");
        assert_eq!(country.swift_codes.len(), 2);
    }

    #[tokio::test]
    async fn test_get_by_unknown_country_is_not_found() {
        let (_, service) = seeded().await;
        let err = service.get_by_country("xx").await.unwrap_err();
        assert!(matches!(err, SwiftError::CountryNotFound(ref c) if c == "XX"));
    }

    #[tokio::test]
    async fn test_create_normalizes_and_derives_flag() {
        let (store, service) = seeded().await;
        let created = service
            .create(new_code(" eeeeffggxxx ", "fr", "france"))
            .await
            .unwrap();
        assert_eq!(created.swift_code, "EEEEFFGGXXX");
        assert!(created.is_headquarter);
        assert_eq!(created.country_iso2, "FR");
        assert_eq!(created.country_name, "FRANCE");
        assert!(store.find_by_code("EEEEFFGGXXX").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_create_duplicate_is_storage_error() {
        let (store, service) = seeded().await;
        let err = service
            .create(new_code("AAAABBPLXXX", "PL", "POLAND"))
            .await
            .unwrap_err();
        assert!(matches!(err, SwiftError::Storage(_)));
        assert_eq!(store.len().await, 6);
    }

    #[tokio::test]
    async fn test_delete_by_code() {
        let (store, service) = seeded().await;
        let removed = service.delete_by_code(" aaaabbpl002").await.unwrap();
        assert_eq!(removed, "AAAABBPL002");
        assert!(store.find_by_code("AAAABBPL002").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_unknown_code_leaves_storage_unchanged() {
        let (store, service) = seeded().await;
        let before = store.list_all().await.unwrap();
        let err = service.delete_by_code("UNKNOWNCODE").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(store.list_all().await.unwrap(), before);
    }
}
