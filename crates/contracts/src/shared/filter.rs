use anyhow::Context;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Предикат отбора по одному полю: объект с единственным ключом-оператором
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterPredicate {
    /// Текст содержит одно из значений
    Contains(Vec<String>),
    /// Больше или равно (начало периода)
    Gte(Vec<String>),
    /// Меньше или равно (конец периода)
    Lte(Vec<String>),
}

impl FilterPredicate {
    pub fn kind(&self) -> PredicateKind {
        match self {
            FilterPredicate::Contains(_) => PredicateKind::Contains,
            FilterPredicate::Gte(_) => PredicateKind::Gte,
            FilterPredicate::Lte(_) => PredicateKind::Lte,
        }
    }

    pub fn values(&self) -> &[String] {
        match self {
            FilterPredicate::Contains(v) | FilterPredicate::Gte(v) | FilterPredicate::Lte(v) => v,
        }
    }
}

/// Вид оператора, выбираемый по ключу фильтра
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredicateKind {
    Contains,
    Gte,
    Lte,
}

/// Ключи с особым оператором; все прочие получают `contains`
const PREDICATE_KINDS: &[(&str, PredicateKind)] = &[
    ("validFrom", PredicateKind::Gte),
    ("validTo", PredicateKind::Lte),
];

impl PredicateKind {
    pub fn for_key(key: &str) -> Self {
        PREDICATE_KINDS
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, kind)| *kind)
            .unwrap_or(PredicateKind::Contains)
    }

    pub fn build(self, values: Vec<String>) -> FilterPredicate {
        match self {
            PredicateKind::Contains => FilterPredicate::Contains(values),
            PredicateKind::Gte => FilterPredicate::Gte(values),
            PredicateKind::Lte => FilterPredicate::Lte(values),
        }
    }
}

/// Набор активных условий отбора: ключ фильтра → предикат
///
/// Порядок ключей совпадает с порядком добавления. Ключ присутствует
/// только пока у фильтра есть непустое значение.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterDescriptor {
    entries: Vec<(String, FilterPredicate)>,
}

impl FilterDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Устанавливает предикат; существующий ключ сохраняет свою позицию
    pub fn set(&mut self, key: impl Into<String>, predicate: FilterPredicate) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = predicate,
            None => self.entries.push((key, predicate)),
        }
    }

    /// Удаляет ключ; возвращает снятый предикат, если он был
    pub fn unset(&mut self, key: &str) -> Option<FilterPredicate> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn get(&self, key: &str) -> Option<&FilterPredicate> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, predicate)| predicate)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterPredicate)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Сериализует набор в строку для поля `where`
    pub fn to_where_json(&self) -> String {
        // Ключи и значения строковые, сериализация не может завершиться ошибкой
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn from_where_json(raw: &str) -> anyhow::Result<Self> {
        serde_json::from_str(raw).with_context(|| format!("invalid where payload: {}", raw))
    }
}

impl Serialize for FilterDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, predicate) in &self.entries {
            map.serialize_entry(key, predicate)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FilterDescriptor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DescriptorVisitor;

        impl<'de> Visitor<'de> for DescriptorVisitor {
            type Value = FilterDescriptor;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of filter key to predicate")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut descriptor = FilterDescriptor::new();
                while let Some((key, predicate)) =
                    access.next_entry::<String, FilterPredicate>()?
                {
                    descriptor.set(key, predicate);
                }
                Ok(descriptor)
            }
        }

        deserializer.deserialize_map(DescriptorVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_predicate_kind_lookup() {
        assert_eq!(PredicateKind::for_key("validFrom"), PredicateKind::Gte);
        assert_eq!(PredicateKind::for_key("validTo"), PredicateKind::Lte);
        assert_eq!(PredicateKind::for_key("material"), PredicateKind::Contains);
        assert_eq!(PredicateKind::for_key(""), PredicateKind::Contains);
        assert_eq!(PredicateKind::for_key("validfrom"), PredicateKind::Contains);
    }

    #[test]
    fn test_predicate_wire_shape() {
        let p = PredicateKind::Gte.build(values(&["2024-01-01"]));
        assert_eq!(
            serde_json::to_string(&p).unwrap(),
            r#"{"gte":["2024-01-01"]}"#
        );
    }

    #[test]
    fn test_set_keeps_insertion_order() {
        let mut d = FilterDescriptor::new();
        d.set("b", FilterPredicate::Contains(values(&["1"])));
        d.set("a", FilterPredicate::Contains(values(&["2"])));
        d.set("b", FilterPredicate::Contains(values(&["3"])));

        assert_eq!(d.keys().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(d.get("b").unwrap().values(), &values(&["3"])[..]);
        assert_eq!(
            d.to_where_json(),
            r#"{"b":{"contains":["3"]},"a":{"contains":["2"]}}"#
        );
    }

    #[test]
    fn test_unset() {
        let mut d = FilterDescriptor::new();
        d.set("plant", FilterPredicate::Contains(values(&["1000"])));
        assert!(d.unset("plant").is_some());
        assert!(d.unset("plant").is_none());
        assert!(d.is_empty());
        assert_eq!(d.to_where_json(), "{}");
    }

    #[test]
    fn test_where_json_round_trip() {
        let raw = r#"{"validFrom":{"gte":["2024-01-01"]},"name":{"contains":["a","b"]}}"#;
        let d = FilterDescriptor::from_where_json(raw).unwrap();
        assert_eq!(d.len(), 2);
        assert_eq!(d.get("validFrom").unwrap().kind(), PredicateKind::Gte);
        assert_eq!(d.to_where_json(), raw);
    }

    #[test]
    fn test_where_json_rejects_unknown_operator() {
        assert!(FilterDescriptor::from_where_json(r#"{"a":{"eq":["1"]}}"#).is_err());
        assert!(FilterDescriptor::from_where_json("[]").is_err());
    }
}
