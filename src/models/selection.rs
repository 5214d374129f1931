//! 学生选择集
//!
//! 持有一次批次操作期间被选中的学生ID，不做任何持久化

/// 学生选择集
///
/// 职责：
/// - 维护待加分的学生ID集合（保持选中顺序）
/// - 只在一次交互的生命周期内存在
/// - 不关心学生数据本身，也不发起网络请求
#[derive(Debug, Clone, Default)]
pub struct Selection {
    ids: Vec<i64>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从已有ID列表构建（去重，保持首次出现顺序）
    pub fn from_ids(ids: impl IntoIterator<Item = i64>) -> Self {
        let mut selection = Self::new();
        for id in ids {
            if !selection.contains(id) {
                selection.ids.push(id);
            }
        }
        selection
    }

    /// 切换单个学生的选中状态：不在则加入，已在则移除
    pub fn toggle(&mut self, student_id: i64) {
        if let Some(pos) = self.ids.iter().position(|&id| id == student_id) {
            self.ids.remove(pos);
        } else {
            self.ids.push(student_id);
        }
    }

    /// 整体替换为给定的候选集合
    pub fn select_all(&mut self, candidate_ids: &[i64]) {
        self.ids.clear();
        for &id in candidate_ids {
            if !self.contains(id) {
                self.ids.push(id);
            }
        }
    }

    /// 清空选择集
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, student_id: i64) -> bool {
        self.ids.contains(&student_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// 当前选中的学生ID列表
    pub fn ids(&self) -> &[i64] {
        &self.ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_twice_restores_original_state() {
        let mut selection = Selection::new();
        selection.toggle(101);
        assert!(selection.contains(101));
        selection.toggle(101);
        assert!(!selection.contains(101));
        assert!(selection.is_empty());
    }

    #[test]
    fn select_all_replaces_wholesale() {
        let mut selection = Selection::from_ids([1, 2, 3]);
        selection.select_all(&[101, 102, 103]);
        assert_eq!(selection.ids(), &[101, 102, 103]);
        assert!(!selection.contains(1));
    }

    #[test]
    fn clear_empties_the_set() {
        let mut selection = Selection::from_ids([101, 102]);
        selection.clear();
        assert!(selection.is_empty());
    }

    #[test]
    fn from_ids_deduplicates_preserving_order() {
        let selection = Selection::from_ids([102, 101, 102, 103]);
        assert_eq!(selection.ids(), &[102, 101, 103]);
    }
}
