use crate::model::repository::{ConnectionType, NodeKind, NodeType};
use crate::repository::{folder_repository, graph_repository};
use crate::test::{cleanup, count, init_workspace};

mod create_node_tests {
    use super::*;

    #[test]
    fn creates_node_with_default_presence() {
        let workspace = init_workspace();
        let con = workspace.open_connection().unwrap();
        let id = graph_repository::create_node(NodeType::Document, 0.0, &con).unwrap();
        let presence: f64 = con
            .query_row("select presence from Nodes where id = ?1", [id], |row| row.get(0))
            .unwrap();
        assert_eq!(0.0, presence);
        cleanup();
    }

    #[test]
    fn fails_for_unseeded_type() {
        let workspace = init_workspace();
        let con = workspace.open_connection().unwrap();
        con.execute("delete from Node_types where name = 'Tag'", [])
            .unwrap();
        let res = graph_repository::create_node(NodeType::Tag, 0.0, &con);
        assert!(res.is_err());
        assert_eq!(0, count(&workspace, "select count(*) from Nodes"));
        cleanup();
    }
}

mod connect_tests {
    use super::*;

    #[test]
    fn allows_duplicate_edges() {
        let workspace = init_workspace();
        let con = workspace.open_connection().unwrap();
        let origin = graph_repository::create_node(NodeType::Document, 0.0, &con).unwrap();
        let tag = graph_repository::create_node(NodeType::Tag, 0.0, &con).unwrap();
        let first = graph_repository::connect(origin, tag, ConnectionType::Tagged, &con).unwrap();
        let second = graph_repository::connect(origin, tag, ConnectionType::Tagged, &con).unwrap();
        assert_ne!(first, second);
        let edges =
            graph_repository::get_connections_between(origin, tag, ConnectionType::Tagged, &con)
                .unwrap();
        assert_eq!(2, edges.len());
        cleanup();
    }

    #[test]
    fn disconnect_only_removes_matching_type() {
        let workspace = init_workspace();
        let con = workspace.open_connection().unwrap();
        let origin = graph_repository::create_node(NodeType::Folder, 0.0, &con).unwrap();
        let destiny = graph_repository::create_node(NodeType::Document, 0.0, &con).unwrap();
        graph_repository::connect(origin, destiny, ConnectionType::Contains, &con).unwrap();
        let removed =
            graph_repository::disconnect(origin, destiny, ConnectionType::Tagged, &con).unwrap();
        assert_eq!(0, removed);
        let edges = graph_repository::get_connections_from(origin, &con).unwrap();
        assert_eq!(1, edges.len());
        assert_eq!(ConnectionType::Contains, edges[0].connection_type);
        cleanup();
    }

    #[test]
    fn deleting_a_node_removes_its_edges() {
        let workspace = init_workspace();
        let con = workspace.open_connection().unwrap();
        let origin = graph_repository::create_node(NodeType::Document, 0.0, &con).unwrap();
        let tag = graph_repository::create_node(NodeType::Tag, 0.0, &con).unwrap();
        con.execute("insert into Tags (id, name) values (?1, 'x')", [tag])
            .unwrap();
        let connection = graph_repository::connect(origin, tag, ConnectionType::Tagged, &con).unwrap();
        graph_repository::record_inherited_tag(connection, tag, &con).unwrap();
        graph_repository::delete_node(origin, &con).unwrap();
        assert_eq!(0, count(&workspace, "select count(*) from Node_connections"));
        assert_eq!(0, count(&workspace, "select count(*) from Inherited_tags"));
        cleanup();
    }
}

mod create_or_get_folder_tests {
    use super::*;

    #[test]
    fn is_idempotent_by_path() {
        let workspace = init_workspace();
        let con = workspace.open_connection().unwrap();
        let first = graph_repository::create_or_get_folder("a", "/ws/a", None, &con).unwrap();
        let second = graph_repository::create_or_get_folder("renamed", "/ws/a", None, &con).unwrap();
        assert_eq!(first, second);
        assert_eq!("a", second.name);
        assert_eq!(1, count(&workspace, "select count(*) from Folders"));
        assert_eq!(1, count(&workspace, "select count(*) from Nodes"));
        cleanup();
    }

    #[test]
    fn connects_child_to_parent() {
        let workspace = init_workspace();
        let con = workspace.open_connection().unwrap();
        let parent = graph_repository::create_or_get_folder("a", "/ws/a", None, &con).unwrap();
        let child =
            graph_repository::create_or_get_folder("b", "/ws/a/b", Some(parent.id), &con).unwrap();
        assert_eq!(Some(parent.id), child.parent_folder_id);
        let edges = graph_repository::get_connections_from(parent.node_id, &con).unwrap();
        assert_eq!(1, edges.len());
        assert_eq!(child.node_id, edges[0].destiny_id);
        assert_eq!(ConnectionType::Contains, edges[0].connection_type);
        cleanup();
    }

    #[test]
    fn root_folders_have_no_structural_edge() {
        let workspace = init_workspace();
        let con = workspace.open_connection().unwrap();
        graph_repository::create_or_get_folder("a", "/ws/a", None, &con).unwrap();
        assert_eq!(0, count(&workspace, "select count(*) from Node_connections"));
        cleanup();
    }
}

mod get_node_tests {
    use super::*;

    #[test]
    fn decodes_folder_payload() {
        let workspace = init_workspace();
        let con = workspace.open_connection().unwrap();
        let folder = graph_repository::create_or_get_folder("a", "/ws/a", None, &con).unwrap();
        let node = graph_repository::get_node(folder.node_id, &con)
            .unwrap()
            .unwrap();
        assert_eq!(NodeKind::Folder(folder), node.kind);
        assert_eq!(NodeType::Folder, node.kind.node_type());
        cleanup();
    }

    #[test]
    fn missing_node_is_none() {
        let workspace = init_workspace();
        let con = workspace.open_connection().unwrap();
        assert_eq!(None, graph_repository::get_node(42, &con).unwrap());
        cleanup();
    }

    #[test]
    fn deleting_folder_node_removes_folder_row() {
        let workspace = init_workspace();
        let con = workspace.open_connection().unwrap();
        let folder = graph_repository::create_or_get_folder("a", "/ws/a", None, &con).unwrap();
        graph_repository::delete_node(folder.node_id, &con).unwrap();
        assert_eq!(None, folder_repository::get_by_id(folder.id, &con).unwrap());
        cleanup();
    }
}
