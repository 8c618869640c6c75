//! Cities the platform operates in.

/// A city partition: the key stored on records and its display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct City {
    pub key: &'static str,
    pub name: &'static str,
}

pub const CITIES: &[City] = &[
    City { key: "almaty", name: "Алматы" },
    City { key: "astana", name: "Астана" },
    City { key: "shymkent", name: "Шымкент" },
    City { key: "karaganda", name: "Караганда" },
    City { key: "aktobe", name: "Актобе" },
    City { key: "taraz", name: "Тараз" },
    City { key: "pavlodar", name: "Павлодар" },
    City { key: "ust_kamenogorsk", name: "Усть-Каменогорск" },
    City { key: "semey", name: "Семей" },
    City { key: "atyrau", name: "Атырау" },
    City { key: "kyzylorda", name: "Кызылорда" },
    City { key: "kostanay", name: "Костанай" },
    City { key: "uralsk", name: "Уральск" },
    City { key: "petropavlovsk", name: "Петропавловск" },
    City { key: "aktau", name: "Актау" },
    City { key: "temirtau", name: "Темиртау" },
    City { key: "turkestan", name: "Туркестан" },
    City { key: "kokshetau", name: "Кокшетау" },
    City { key: "taldykorgan", name: "Талдыкорган" },
    City { key: "ekibastuz", name: "Экибастуз" },
    City { key: "zhezkazgan", name: "Жезказган" },
    City { key: "balkhash", name: "Балхаш" },
    City { key: "kentau", name: "Кентау" },
    City { key: "rudny", name: "Рудный" },
    City { key: "zhanaozen", name: "Жанаозен" },
];

/// Look up a city by its partition key.
pub fn find_city(key: &str) -> Option<&'static City> {
    CITIES.iter().find(|city| city.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_city() {
        assert_eq!(find_city("almaty").map(|c| c.name), Some("Алматы"));
        assert_eq!(find_city("ust_kamenogorsk").map(|c| c.name), Some("Усть-Каменогорск"));
        assert!(find_city("Almaty").is_none());
    }

    #[test]
    fn test_keys_are_unique() {
        let mut keys: Vec<_> = CITIES.iter().map(|c| c.key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), CITIES.len());
        assert_eq!(CITIES.len(), 25);
    }
}
