mod get_rule_list;

pub use get_rule_list::GetRuleListUseCase;
