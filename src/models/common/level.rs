crate::define_string_enum! {
    /// 课程 / 测验难度级别
    pub enum ProficiencyLevel("../frontend/src/types/generated/common.ts") {
        Beginner => "beginner",
        Intermediate => "intermediate",
        Advanced => "advanced",
    }
}

impl Default for ProficiencyLevel {
    fn default() -> Self {
        Self::Beginner
    }
}
