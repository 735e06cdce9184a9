use indexmap::IndexMap;

/// DTO type names derived for one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityDtos {
    pub entity: String,
    pub create_input: String,
    pub update_input: String,
    pub where_input: String,
    pub where_unique_input: String,
    pub order_by_input: String,
    pub find_many_args: String,
}

impl EntityDtos {
    pub fn for_entity(entity: &str) -> Self {
        Self {
            entity: entity.to_string(),
            create_input: format!("{}CreateInput", entity),
            update_input: format!("{}UpdateInput", entity),
            where_input: format!("{}WhereInput", entity),
            where_unique_input: format!("{}WhereUniqueInput", entity),
            order_by_input: format!("{}OrderByInput", entity),
            find_many_args: format!("{}FindManyArgs", entity),
        }
    }

    /// All DTO names for the entity, entity type first.
    pub fn names(&self) -> [&str; 7] {
        [
            &self.entity,
            &self.create_input,
            &self.update_input,
            &self.where_input,
            &self.where_unique_input,
            &self.order_by_input,
            &self.find_many_args,
        ]
    }
}

/// DTO names for every entity, keyed by entity name in manifest order.
pub type Dtos = IndexMap<String, EntityDtos>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_entity() {
        let dtos = EntityDtos::for_entity("Order");
        assert_eq!(
            dtos.names(),
            [
                "Order",
                "OrderCreateInput",
                "OrderUpdateInput",
                "OrderWhereInput",
                "OrderWhereUniqueInput",
                "OrderOrderByInput",
                "OrderFindManyArgs"
            ]
        );
    }
}
