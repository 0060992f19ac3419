//! Starter board shown when nothing has been stored yet.

use crate::model::topic::{Subtopic, Topic};

fn subtopic(id: &str, title: &str, summary: &str) -> Subtopic {
    Subtopic {
        id: id.to_string(),
        title: title.to_string(),
        summary: summary.to_string(),
    }
}

fn topic(
    id: &str,
    title: &str,
    icon: &str,
    color: &str,
    summary: &str,
    tags: &[&str],
    subtopics: Vec<Subtopic>,
) -> Topic {
    Topic {
        id: id.to_string(),
        title: title.to_string(),
        icon: icon.to_string(),
        color: color.to_string(),
        summary: summary.to_string(),
        tags: tags.iter().map(|tag| (*tag).to_string()).collect(),
        subtopics,
    }
}

/// Returns the default AWS / Docker / Kubernetes board.
pub fn seed_topics() -> Vec<Topic> {
    vec![
        topic(
            "topic-aws",
            "AWS",
            "aws.svg",
            "from-amber-500/60 to-amber-400/30",
            "Servicios principales de Amazon Web Services enfocados en cómputo y almacenamiento.",
            &["cloud", "aws"],
            vec![
                subtopic(
                    "subtopic-aws-ec2",
                    "EC2",
                    "Instancias de cómputo elásticas para ejecutar workloads en la nube. Soporta auto scaling, AMIs y distintos tipos de instancia.",
                ),
                subtopic(
                    "subtopic-aws-s3",
                    "S3",
                    "Servicio de almacenamiento de objetos. Ideal para backups, data lakes y hosting estático. Versioning, lifecycle policies y buckets cifrados.",
                ),
            ],
        ),
        topic(
            "topic-docker",
            "Docker",
            "docker.svg",
            "from-sky-500/60 to-cyan-400/30",
            "Plataforma de contenedores para construir, compartir y ejecutar aplicaciones de manera aislada y reproducible.",
            &["containers", "devops"],
            vec![
                subtopic(
                    "subtopic-docker-images",
                    "Images",
                    "Plantillas inmutables que definen el sistema de archivos y la configuración de un contenedor. Construidas con Dockerfile.",
                ),
                subtopic(
                    "subtopic-docker-containers",
                    "Containers",
                    "Instancias en ejecución de una imagen. Se pueden gestionar con docker run, docker ps, logs, exec y compose.",
                ),
            ],
        ),
        topic(
            "topic-kubernetes",
            "Kubernetes",
            "kubernetes.svg",
            "from-indigo-500/60 to-purple-500/30",
            "Orquestador de contenedores para despliegues declarativos, escalamiento automático y gestión de servicios resilientes.",
            &["k8s", "orchestrator"],
            vec![
                subtopic(
                    "subtopic-k8s-pods",
                    "Pods",
                    "Unidad mínima desplegable compuesta por uno o más contenedores que comparten red y almacenamiento.",
                ),
                subtopic(
                    "subtopic-k8s-services",
                    "Services",
                    "Abstracción para exponer Pods de manera estable. Tipos ClusterIP, NodePort, LoadBalancer e Ingress.",
                ),
            ],
        ),
    ]
}
