mod graph_repository;
