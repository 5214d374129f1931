use phf::phf_map;

/// 学院枚举
///
/// 学院用于学生分组积分竞赛，本程序只把它当作筛选条件使用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum House {
    /// 青龙
    AzureDragon = 1,
    /// 白虎
    WhiteTiger = 2,
    /// 朱雀
    VermilionBird = 3,
    /// 玄武
    BlackTortoise = 4,
}

/// 名称/别名 → 学院 的静态映射表
static HOUSE_ALIASES: phf::Map<&'static str, House> = phf_map! {
    "青龙" => House::AzureDragon,
    "青龙院" => House::AzureDragon,
    "白虎" => House::WhiteTiger,
    "白虎院" => House::WhiteTiger,
    "朱雀" => House::VermilionBird,
    "朱雀院" => House::VermilionBird,
    "玄武" => House::BlackTortoise,
    "玄武院" => House::BlackTortoise,
};

impl House {
    /// 获取学院ID
    pub fn id(self) -> i64 {
        self as i64
    }

    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            House::AzureDragon => "青龙",
            House::WhiteTiger => "白虎",
            House::VermilionBird => "朱雀",
            House::BlackTortoise => "玄武",
        }
    }

    /// 从ID解析学院
    pub fn from_id(id: i64) -> Option<Self> {
        match id {
            1 => Some(House::AzureDragon),
            2 => Some(House::WhiteTiger),
            3 => Some(House::VermilionBird),
            4 => Some(House::BlackTortoise),
            _ => None,
        }
    }

    /// 从名称解析学院（精确匹配别名表）
    pub fn from_name(s: &str) -> Option<Self> {
        HOUSE_ALIASES.get(s.trim()).copied()
    }
}

impl std::fmt::Display for House {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_resolve_to_same_house() {
        assert_eq!(House::from_name("青龙"), Some(House::AzureDragon));
        assert_eq!(House::from_name("青龙院"), Some(House::AzureDragon));
        assert_eq!(House::from_name(" 玄武 "), Some(House::BlackTortoise));
        assert_eq!(House::from_name("不存在"), None);
    }

    #[test]
    fn id_round_trips() {
        for house in [
            House::AzureDragon,
            House::WhiteTiger,
            House::VermilionBird,
            House::BlackTortoise,
        ] {
            assert_eq!(House::from_id(house.id()), Some(house));
        }
    }
}
